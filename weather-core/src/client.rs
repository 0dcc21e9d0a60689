use reqwest::Client;

use crate::{
    error::{WeatherError, truncate_body},
    model::{Location, WeatherBundle},
};

/// Talks to the `weather-server` proxy rather than to the provider directly.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    http: Client,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub async fn fetch_weather(&self, location: &Location) -> Result<WeatherBundle, WeatherError> {
        const WHAT: &str = "weather proxy";
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("location", location.to_string())])
            .send()
            .await
            .map_err(|source| WeatherError::Request { what: WHAT, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Request { what: WHAT, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                what: WHAT,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Parse { what: WHAT, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[tokio::test]
    async fn sends_location_as_query_parameter() {
        let server = MockServer::start().await;
        let envelope = json!({
            "currentWeather": {"coord": {"lat": 35.68, "lon": 139.69}, "main": {"temp": 288.0}},
            "forecast": {"list": []}
        });

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("location", "35.68,139.69"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
            .expect(1)
            .mount(&server)
            .await;

        let client = ProxyClient::new(&format!("{}/", server.uri()));
        let location = Location::parse("35.68,139.69").unwrap();
        let bundle = client.fetch_weather(&location).await.unwrap();

        assert_eq!(bundle.current_weather, envelope["currentWeather"]);
        assert_eq!(bundle.forecast, envelope["forecast"]);
    }

    #[tokio::test]
    async fn proxy_failure_surfaces_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"error": "Failed to fetch weather data"})),
            )
            .mount(&server)
            .await;

        let client = ProxyClient::new(&server.uri());
        let err = client
            .fetch_weather(&Location::Place("Atlantis".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Status { status: 500, .. }));
    }
}
