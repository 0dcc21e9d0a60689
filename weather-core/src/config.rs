use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Coordinates;

/// Upstream provider credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    /// Overrides the OpenWeather base URL, e.g. for a local stub.
    pub base_url: Option<String>,
}

/// Where the proxy service listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the terminal front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub proxy_url: String,
    /// `"lat,lon"` used when no location is entered.
    pub home_coordinates: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: "http://localhost:5001".to_string(),
            home_coordinates: None,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [provider]
/// api_key = "..."
///
/// [server]
/// port = 5001
///
/// [client]
/// proxy_url = "http://localhost:5001"
/// home_coordinates = "48.85,2.35"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub server: ServerConfig,
    pub client: ClientConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the saved favorites list.
    pub fn favorites_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("favorites.json"))
    }

    /// Apply `OPENWEATHER_API_KEY`, `PORT`, `WEATHER_PROXY_URL` and
    /// `WEATHER_COORDINATES` from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(key) = lookup("OPENWEATHER_API_KEY") {
            self.provider.api_key = Some(key);
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{port}'"))?;
        }
        if let Some(url) = lookup("WEATHER_PROXY_URL") {
            self.client.proxy_url = url;
        }
        if let Some(coords) = lookup("WEATHER_COORDINATES") {
            self.client.home_coordinates = Some(coords);
        }
        Ok(self)
    }

    /// Returns the OpenWeather API key or a hint on how to set one.
    pub fn provider_api_key(&self) -> Result<&str> {
        self.provider
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `weather configure` or set OPENWEATHER_API_KEY."
                )
            })
    }

    pub fn set_provider_api_key(&mut self, api_key: String) {
        self.provider.api_key = Some(api_key);
    }

    /// The device's own position, if one is configured.
    pub fn home_coordinates(&self) -> Result<Option<Coordinates>> {
        self.client
            .home_coordinates
            .as_deref()
            .map(|raw| {
                Coordinates::parse(raw).ok_or_else(|| {
                    anyhow!("Invalid home coordinates '{raw}': expected \"lat,lon\"")
                })
            })
            .transpose()
    }
}
