use std::fmt::Write as _;

use weather_core::{TemperatureUnit, WeatherSession, WeatherView};

pub fn weather(view: &WeatherView, unit: TemperatureUnit) -> String {
    let mut out = String::new();

    match view.current.name.as_deref() {
        Some(name) if !name.is_empty() => {
            let _ = writeln!(out, "Current Weather ({name})");
        }
        _ => out.push_str("Current Weather\n"),
    }
    let _ = writeln!(out, "  Temperature: {}", unit.format(view.current.main.temp));
    let _ = writeln!(out, "  Description: {}", view.current.description());

    if view.daily.is_empty() {
        return out;
    }

    out.push_str("\n5-Day Weather Forecast\n");
    for (date, summary) in &view.daily {
        let _ = writeln!(
            out,
            "  {} {}  Max: {}  Min: {}",
            date.format("%a"),
            date,
            unit.format(summary.max),
            unit.format(summary.min),
        );
    }

    out
}

/// Error line (if any) followed by the latest successful result (if any).
pub fn session(session: &WeatherSession) -> String {
    let mut out = String::new();

    if let Some(error) = session.error() {
        let _ = writeln!(out, "Error: {error}");
    }
    if let Some(view) = session.view() {
        out.push_str(&weather(view, session.unit()));
    }

    out
}

pub fn favorites(locations: &[String]) -> String {
    if locations.is_empty() {
        return "No saved locations yet.\n".to_string();
    }

    let mut out = String::from("Saved Locations\n");
    for (i, location) in locations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {location}", i + 1);
    }
    out
}
