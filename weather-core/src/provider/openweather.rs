use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{
    error::{WeatherError, truncate_body},
    model::{Coordinates, Location, WeatherBundle},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_current(&self, location: &Location) -> Result<Value, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let mut query = match location {
            Location::Place(name) => vec![("q", name.clone())],
            Location::Coordinates(coords) => coords_query(coords),
        };
        query.push(("appid", self.api_key.clone()));

        self.get_json(&url, &query, "OpenWeather current weather").await
    }

    async fn fetch_forecast(&self, coords: &Coordinates) -> Result<Value, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);

        let mut query = coords_query(coords);
        query.push(("appid", self.api_key.clone()));

        self.get_json(&url, &query, "OpenWeather forecast").await
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &'static str,
    ) -> Result<Value, WeatherError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Request { what, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Request { what, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                what,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Parse { what, source })
    }
}

fn coords_query(coords: &Coordinates) -> Vec<(&'static str, String)> {
    vec![("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    /// Current weather first; the forecast is requested for the coordinates
    /// that response resolved, so the two calls cannot run concurrently.
    async fn fetch_weather(&self, location: &Location) -> Result<WeatherBundle, WeatherError> {
        tracing::debug!(%location, "Fetching current weather");
        let current_weather = self.fetch_current(location).await?;

        let coords = Coordinates::from_current_weather(&current_weather)
            .ok_or(WeatherError::MissingCoordinates)?;
        tracing::debug!(lat = coords.lat, lon = coords.lon, "Fetching forecast");

        let forecast = self.fetch_forecast(&coords).await?;

        Ok(WeatherBundle {
            current_weather,
            forecast,
        })
    }
}
