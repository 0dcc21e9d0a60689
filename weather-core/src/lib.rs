//! Core library for the weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider used by `weather-server`
//! - The proxy client, forecast aggregation and favorites used by `weather-cli`
//! - Shared domain models (locations, the proxy envelope, forecast entries)

pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod forecast;
pub mod logging;
pub mod model;
pub mod provider;
pub mod session;
pub mod units;

pub use client::ProxyClient;
pub use config::{ClientConfig, Config, ProviderConfig, ServerConfig};
pub use error::WeatherError;
pub use favorites::{AddOutcome, FavoritesStorage, FavoritesStore, JsonFileStorage};
pub use forecast::{DailyForecast, DailySummary, aggregate_daily};
pub use model::{Coordinates, CurrentWeather, ForecastEntry, Location, WeatherBundle};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use session::{WeatherSession, WeatherView};
pub use units::TemperatureUnit;
