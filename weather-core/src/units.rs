use std::fmt;

use serde::{Deserialize, Serialize};

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - 273.15
}

pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    kelvin * 9.0 / 5.0 - 459.67
}

/// Display unit for temperatures. Provider data always arrives in Kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggle(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn from_kelvin(self, kelvin: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => kelvin_to_celsius(kelvin),
            TemperatureUnit::Fahrenheit => kelvin_to_fahrenheit(kelvin),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Two decimals plus the unit symbol, e.g. `21.85°C`.
    pub fn format(self, kelvin: f64) -> String {
        format!("{:.2}{}", self.from_kelvin(kelvin), self.symbol())
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_point_converts_exactly_to_two_decimals() {
        assert_eq!(format!("{:.2}", kelvin_to_celsius(273.15)), "0.00");
        assert_eq!(format!("{:.2}", kelvin_to_fahrenheit(273.15)), "32.00");
    }

    #[test]
    fn format_appends_symbol() {
        assert_eq!(TemperatureUnit::Celsius.format(300.0), "26.85°C");
        assert_eq!(TemperatureUnit::Fahrenheit.format(300.0), "80.33°F");
    }

    #[test]
    fn toggle_flips_between_the_two_units() {
        let unit = TemperatureUnit::default();
        assert_eq!(unit, TemperatureUnit::Celsius);
        assert_eq!(unit.toggle(), TemperatureUnit::Fahrenheit);
        assert_eq!(unit.toggle().toggle(), TemperatureUnit::Celsius);
    }
}
