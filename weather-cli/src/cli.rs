use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Text, validator::Validation};
use weather_core::{
    AddOutcome, Config, Coordinates, FavoritesStore, JsonFileStorage, ProxyClient,
    WeatherSession,
};

use crate::{interactive, lookup::lookup, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive menu.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key, proxy URL and home coordinates.
    Configure,

    /// Show current weather and the 5-day forecast.
    Show {
        /// City name or "lat,lon". Omit to use your configured home coordinates.
        location: Option<String>,

        /// Display temperatures in Fahrenheit instead of Celsius.
        #[arg(long)]
        fahrenheit: bool,
    },

    /// Manage saved locations.
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Menu-driven session: look up, save and revisit locations.
    Interactive,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List saved locations in the order they were added.
    List,
    /// Save a location.
    Add { location: String },
    /// Forget a saved location.
    Remove { location: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            // Environment overrides must not leak into the saved file.
            Command::Configure => configure(Config::load()?)?,
            Command::Show {
                location,
                fahrenheit,
            } => {
                let config = runtime_config()?;
                let client = ProxyClient::new(&config.client.proxy_url);
                let mut session = WeatherSession::new();
                if fahrenheit {
                    session.toggle_unit();
                }

                lookup(
                    &client,
                    &config,
                    &mut session,
                    location.as_deref().unwrap_or_default(),
                )
                .await;
                print!("{}", show_output(&session)?);
            }
            Command::Favorites { action } => {
                let mut favorites = open_favorites()?;
                match action {
                    FavoritesCommand::List => print!("{}", render::favorites(favorites.locations())),
                    FavoritesCommand::Add { location } => match favorites.add(&location) {
                        AddOutcome::Added => println!("Saved \"{}\".", location.trim()),
                        AddOutcome::AlreadySaved => {
                            println!("\"{}\" is already saved.", location.trim())
                        }
                        AddOutcome::Empty => println!("Nothing to save: location is empty."),
                    },
                    FavoritesCommand::Remove { location } => {
                        if favorites.remove(&location) {
                            println!("Removed \"{}\".", location.trim());
                        } else {
                            println!("\"{}\" is not saved.", location.trim());
                        }
                    }
                }
            }
            Command::Interactive => {
                interactive::run(&runtime_config()?, open_favorites()?).await?;
            }
        }

        Ok(())
    }
}

/// The rendered result, or the session's error as the command's failure.
fn show_output(session: &WeatherSession) -> anyhow::Result<String> {
    match session.error() {
        Some(message) => Err(anyhow::anyhow!("{message}")),
        None => Ok(render::session(session)),
    }
}

fn runtime_config() -> anyhow::Result<Config> {
    Config::load()?.with_env_overrides()
}

fn open_favorites() -> anyhow::Result<FavoritesStore<JsonFileStorage>> {
    let path = Config::favorites_file_path()?;
    tracing::debug!(path = %path.display(), "Loading favorites");
    FavoritesStore::load(JsonFileStorage::new(path))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_provider_api_key(api_key.trim().to_string());
    }

    let proxy_url = Text::new("Weather proxy URL:")
        .with_default(&config.client.proxy_url)
        .prompt()
        .context("Failed to read proxy URL")?;
    config.client.proxy_url = proxy_url.trim().to_string();

    let current_home = config.client.home_coordinates.clone().unwrap_or_default();
    let home = Text::new("Home coordinates (lat,lon):")
        .with_initial_value(&current_home)
        .with_help_message("Used when no location is entered; leave empty to disable")
        .with_validator(|input: &str| {
            if input.trim().is_empty() || Coordinates::parse(input).is_some() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(
                    "Expected \"lat,lon\", e.g. 48.85,2.35".into(),
                ))
            }
        })
        .prompt()
        .context("Failed to read home coordinates")?;
    config.client.home_coordinates = Some(home.trim().to_string()).filter(|h| !h.is_empty());

    config.save()?;
    println!(
        "Configuration saved to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use weather_core::WeatherBundle;

    #[test]
    fn failed_show_reports_the_message_only_as_the_error() {
        let mut session = WeatherSession::new();
        let ticket = session.begin_request();
        session.fail(ticket, "Could not determine your current location.");

        let err = show_output(&session).unwrap_err();
        assert_eq!(err.to_string(), "Could not determine your current location.");
    }

    #[test]
    fn successful_show_renders_without_error_line() {
        let mut session = WeatherSession::new();
        let ticket = session.begin_request();
        session.complete(
            ticket,
            Ok(WeatherBundle {
                current_weather: json!({"main": {"temp": 273.15}, "weather": []}),
                forecast: json!({"list": []}),
            }),
        );

        let text = show_output(&session).unwrap();
        assert!(text.starts_with("Current Weather\n"));
        assert!(text.contains("Temperature: 0.00°C"));
        assert!(!text.contains("Error:"));
    }
}
