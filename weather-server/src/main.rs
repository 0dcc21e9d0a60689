//! Binary crate for the weather proxy.
//!
//! Exposes `GET /` and `GET /weather?location=...`, forwarding the latter to
//! OpenWeather and returning the raw payloads in one envelope.

use std::sync::Arc;

use anyhow::Context;
use weather_core::{Config, logging, provider::provider_from_config};

mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("weather_server=info,weather_core=info");

    let config = Config::load()?.with_env_overrides()?;
    let provider = provider_from_config(&config)?;
    tracing::info!(base_url = provider.base_url(), "Using OpenWeather provider");

    let app = routes::router(Arc::new(provider));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server is running on {addr}");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
