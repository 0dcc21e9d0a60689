//! State behind the front end: the latest result, the selected unit and a
//! generation counter that keeps late responses from overwriting newer ones.

use crate::{
    error::WeatherError,
    forecast::{DailyForecast, aggregate_daily},
    model::{CurrentWeather, WeatherBundle},
    units::TemperatureUnit,
};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

/// Identifies one weather request. Only the most recently issued ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Everything needed to render one successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub current: CurrentWeather,
    pub daily: DailyForecast,
}

impl WeatherView {
    pub fn from_bundle(bundle: &WeatherBundle) -> Result<Self, WeatherError> {
        Ok(Self {
            current: bundle.current()?,
            daily: aggregate_daily(&bundle.forecast_entries()?),
        })
    }
}

#[derive(Debug, Default)]
pub struct WeatherSession {
    unit: TemperatureUnit,
    latest: u64,
    loading: bool,
    view: Option<WeatherView>,
    error: Option<String>,
}

impl WeatherSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.unit = self.unit.toggle();
        self.unit
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> Option<&WeatherView> {
        self.view.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a new request, invalidating any that is still in flight.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.latest += 1;
        self.loading = true;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply a finished request. Returns `false` if a newer request superseded it.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<WeatherBundle, WeatherError>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "Discarding stale weather result");
            return false;
        }

        self.loading = false;
        match result.and_then(|bundle| WeatherView::from_bundle(&bundle)) {
            Ok(view) => {
                self.view = Some(view);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("Error fetching weather data: {err}");
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// End a request without a response, e.g. when no location could be determined.
    pub fn fail(&mut self, ticket: RequestTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }
}
