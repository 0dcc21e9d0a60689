use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WeatherError;

/// A geographic point as OpenWeather reports it in `coord`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Parse a `"lat,lon"` pair. Returns `None` unless both halves are finite numbers.
    pub fn parse(input: &str) -> Option<Self> {
        let (lat, lon) = input.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;

        (lat.is_finite() && lon.is_finite()).then_some(Self { lat, lon })
    }

    /// Read `coord.lat` / `coord.lon` out of a raw current-weather payload.
    pub fn from_current_weather(payload: &Value) -> Option<Self> {
        let coord = payload.get("coord")?;
        Some(Self {
            lat: coord.get("lat")?.as_f64()?,
            lon: coord.get("lon")?.as_f64()?,
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// What the user asked the weather for: a place name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Place(String),
    Coordinates(Coordinates),
}

impl Location {
    pub fn parse(input: &str) -> Result<Self, WeatherError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::EmptyLocation);
        }

        Ok(match Coordinates::parse(trimmed) {
            Some(coords) => Location::Coordinates(coords),
            None => Location::Place(trimmed.to_string()),
        })
    }
}

impl FromStr for Location {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Coordinates> for Location {
    fn from(coords: Coordinates) -> Self {
        Location::Coordinates(coords)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Place(name) => f.write_str(name),
            Location::Coordinates(coords) => write!(f, "{coords}"),
        }
    }
}

/// The proxy's response envelope. Both payloads are the provider's JSON, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherBundle {
    #[serde(rename = "currentWeather")]
    pub current_weather: Value,
    pub forecast: Value,
}

impl WeatherBundle {
    /// Typed view of the fields the front end renders from `currentWeather`.
    pub fn current(&self) -> Result<CurrentWeather, WeatherError> {
        CurrentWeather::deserialize(&self.current_weather).map_err(|source| WeatherError::Parse {
            what: "current weather",
            source,
        })
    }

    /// The 3-hour entries from `forecast.list`.
    pub fn forecast_entries(&self) -> Result<Vec<ForecastEntry>, WeatherError> {
        let forecast = Forecast::deserialize(&self.forecast).map_err(|source| {
            WeatherError::Parse {
                what: "forecast",
                source,
            }
        })?;
        Ok(forecast.list)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MainReading {
    /// Kelvin.
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub coord: Option<Coordinates>,
    pub main: MainReading,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl CurrentWeather {
    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map(|w| w.description.as_str())
            .unwrap_or("Unknown")
    }
}

/// Temperatures in Kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TemperatureRange {
    pub temp_min: f64,
    pub temp_max: f64,
}

/// One 3-hour data point of the 5-day forecast.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp, seconds.
    pub dt: i64,
    pub main: TemperatureRange,
}

impl ForecastEntry {
    pub fn new(dt: i64, temp_min: f64, temp_max: f64) -> Self {
        Self {
            dt,
            main: TemperatureRange { temp_min, temp_max },
        }
    }
}

#[derive(Debug, Deserialize)]
struct Forecast {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn location_parses_coordinates_and_places() {
        assert_eq!(
            Location::parse(" 48.85, 2.35 ").unwrap(),
            Location::Coordinates(Coordinates { lat: 48.85, lon: 2.35 })
        );
        assert_eq!(
            Location::parse("Paris,FR").unwrap(),
            Location::Place("Paris,FR".to_string())
        );
        assert_eq!(
            Location::parse("  London ").unwrap(),
            Location::Place("London".to_string())
        );
    }

    #[test]
    fn empty_location_is_rejected() {
        assert!(matches!(Location::parse("   "), Err(WeatherError::EmptyLocation)));
    }

    #[test]
    fn non_finite_coordinates_are_treated_as_place_names() {
        assert!(matches!(Location::parse("NaN,1"), Ok(Location::Place(_))));
    }

    #[test]
    fn coordinates_display_as_lat_lon() {
        let coords = Coordinates { lat: 51.5, lon: -0.12 };
        assert_eq!(coords.to_string(), "51.5,-0.12");
        assert_eq!(Coordinates::parse(&coords.to_string()), Some(coords));
    }

    #[test]
    fn bundle_uses_camel_case_envelope() {
        let bundle = WeatherBundle {
            current_weather: json!({"name": "Paris"}),
            forecast: json!({"list": []}),
        };
        let value = serde_json::to_value(&bundle).unwrap();
        assert_eq!(value["currentWeather"]["name"], "Paris");
        assert!(value.get("forecast").is_some());
    }

    #[test]
    fn bundle_keeps_upstream_key_order() {
        let raw = r#"{"coord":{"lon":2.35,"lat":48.85},"weather":[],"base":"stations"}"#;
        let bundle = WeatherBundle {
            current_weather: serde_json::from_str(raw).unwrap(),
            forecast: serde_json::from_str(r#"{"cod":"200","list":[],"city":{}}"#).unwrap(),
        };

        let out = serde_json::to_string(&bundle).unwrap();
        assert_eq!(
            out,
            format!(r#"{{"currentWeather":{raw},"forecast":{{"cod":"200","list":[],"city":{{}}}}}}"#)
        );
    }

    #[test]
    fn bundle_exposes_typed_views() {
        let bundle = WeatherBundle {
            current_weather: json!({
                "coord": {"lon": 2.35, "lat": 48.85},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
                "main": {"temp": 293.15, "humidity": 40},
                "name": "Paris"
            }),
            forecast: json!({
                "cnt": 1,
                "list": [{"dt": 1700000000, "main": {"temp": 280.0, "temp_min": 279.0, "temp_max": 281.0}}]
            }),
        };

        let current = bundle.current().unwrap();
        assert_eq!(current.description(), "clear sky");
        assert_eq!(current.coord, Some(Coordinates { lat: 48.85, lon: 2.35 }));
        assert_eq!(
            Coordinates::from_current_weather(&bundle.current_weather),
            current.coord
        );

        let entries = bundle.forecast_entries().unwrap();
        assert_eq!(entries, vec![ForecastEntry::new(1700000000, 279.0, 281.0)]);
    }

    #[test]
    fn missing_coord_yields_none() {
        assert_eq!(Coordinates::from_current_weather(&json!({"cod": 200})), None);
        assert_eq!(
            Coordinates::from_current_weather(&json!({"coord": {"lat": "x", "lon": 1.0}})),
            None
        );
    }
}
