use weather_core::{Config, Location, ProxyClient, WeatherSession};

pub const LOCATION_UNAVAILABLE: &str = "Could not determine your current location. \
     Enter a city or coordinates, or set home coordinates with `weather configure`.";

/// Free text when given, otherwise the device's configured coordinates.
pub fn resolve_location(input: &str, config: &Config) -> Result<Location, String> {
    let input = input.trim();
    if !input.is_empty() {
        return Location::parse(input).map_err(|err| err.to_string());
    }

    match config.home_coordinates() {
        Ok(Some(coords)) => Ok(Location::from(coords)),
        Ok(None) => Err(LOCATION_UNAVAILABLE.to_string()),
        Err(err) => {
            tracing::warn!("{err:#}");
            Err(LOCATION_UNAVAILABLE.to_string())
        }
    }
}

/// Run one weather request through the session, which discards it if a
/// newer request was issued in the meantime.
pub async fn lookup(
    client: &ProxyClient,
    config: &Config,
    session: &mut WeatherSession,
    input: &str,
) {
    let ticket = session.begin_request();

    match resolve_location(input, config) {
        Ok(location) => {
            eprintln!("Loading...");
            let result = client.fetch_weather(&location).await;
            session.complete(ticket, result);
        }
        Err(message) => {
            session.fail(ticket, message);
        }
    }
}
