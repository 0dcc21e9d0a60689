use thiserror::Error;

/// Failures while talking to the weather provider or to the proxy service.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location must not be empty")]
    EmptyLocation,

    #[error("Failed to send {what} request: {source}")]
    Request {
        what: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{what} request failed with status {status}: {body}")]
    Status {
        what: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {what} JSON: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Current weather response has no usable coord.lat/coord.lon")]
    MissingCoordinates,
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
