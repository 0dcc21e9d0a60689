use crate::{Config, WeatherBundle, error::WeatherError, model::Location};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Upstream source of current weather plus a 5-day forecast.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, location: &Location) -> Result<WeatherBundle, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.provider_api_key()?;

    let provider = match config.provider.base_url.as_deref() {
        Some(base_url) => OpenWeatherProvider::with_base_url(api_key.to_owned(), base_url),
        None => OpenWeatherProvider::new(api_key.to_owned()),
    };

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn provider_from_config_honours_base_url() {
        let mut cfg = Config::default();
        cfg.set_provider_api_key("KEY".to_string());
        cfg.provider.base_url = Some("http://127.0.0.1:9/".to_string());

        let provider = provider_from_config(&cfg).expect("api key is set");
        assert_eq!(provider.base_url(), "http://127.0.0.1:9");
    }
}
