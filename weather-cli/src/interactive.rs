use std::fmt;

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use weather_core::{
    AddOutcome, Config, FavoritesStorage, FavoritesStore, ProxyClient, TemperatureUnit,
    WeatherSession,
};

use crate::{lookup::lookup, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    GetWeather,
    SaveLocation,
    ToggleUnit(TemperatureUnit),
    ViewSaved,
    RemoveSaved,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::GetWeather => f.write_str("Get weather"),
            Action::SaveLocation => f.write_str("Save location"),
            Action::ToggleUnit(unit) => write!(f, "Toggle temperature unit ({unit})"),
            Action::ViewSaved => f.write_str("View saved location"),
            Action::RemoveSaved => f.write_str("Remove saved location"),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

fn menu(unit: TemperatureUnit, has_favorites: bool) -> Vec<Action> {
    let mut actions = vec![
        Action::GetWeather,
        Action::SaveLocation,
        Action::ToggleUnit(unit),
    ];
    if has_favorites {
        actions.extend([Action::ViewSaved, Action::RemoveSaved]);
    }
    actions.push(Action::Quit);
    actions
}

/// Esc and Ctrl-C end the prompt without an answer rather than with an error.
fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub async fn run<S: FavoritesStorage>(
    config: &Config,
    mut favorites: FavoritesStore<S>,
) -> Result<()> {
    let client = ProxyClient::new(&config.client.proxy_url);
    let mut session = WeatherSession::new();
    let mut location = String::new();

    print!("{}", render::favorites(favorites.locations()));

    loop {
        let actions = menu(session.unit(), !favorites.is_empty());
        let Some(action) = answered(Select::new("What would you like to do?", actions).prompt())?
        else {
            break;
        };

        match action {
            Action::GetWeather => {
                let Some(input) = answered(
                    Text::new("Enter city or coordinates:")
                        .with_initial_value(&location)
                        .with_help_message("Leave empty to use your current location")
                        .prompt(),
                )?
                else {
                    continue;
                };
                location = input.trim().to_string();

                lookup(&client, config, &mut session, &location).await;
                print!("{}", render::session(&session));
            }
            Action::SaveLocation => {
                if location.is_empty() {
                    let input = answered(Text::new("Location to save:").prompt())?;
                    location = input.unwrap_or_default().trim().to_string();
                }
                match favorites.add(&location) {
                    AddOutcome::Added => println!("Saved \"{location}\"."),
                    AddOutcome::AlreadySaved => println!("\"{location}\" is already saved."),
                    AddOutcome::Empty => println!("Enter a location before saving it."),
                }
            }
            Action::ToggleUnit(_) => {
                let unit = session.toggle_unit();
                println!("Temperatures now shown in {unit}.");
                if let Some(view) = session.view() {
                    print!("{}", render::weather(view, unit));
                }
            }
            Action::ViewSaved => {
                let saved = favorites.locations().to_vec();
                let Some(choice) = answered(Select::new("Saved locations:", saved).prompt())? else {
                    continue;
                };
                location = choice;

                lookup(&client, config, &mut session, &location).await;
                print!("{}", render::session(&session));
            }
            Action::RemoveSaved => {
                let saved = favorites.locations().to_vec();
                let Some(choice) = answered(Select::new("Remove which location?", saved).prompt())?
                else {
                    continue;
                };
                if favorites.remove(&choice) {
                    println!("Removed \"{choice}\".");
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_location_actions_only_offered_when_there_are_favorites() {
        assert_eq!(
            menu(TemperatureUnit::Celsius, false),
            vec![
                Action::GetWeather,
                Action::SaveLocation,
                Action::ToggleUnit(TemperatureUnit::Celsius),
                Action::Quit,
            ]
        );
        assert!(menu(TemperatureUnit::Celsius, true).contains(&Action::ViewSaved));
    }

    #[test]
    fn toggle_label_names_the_current_unit() {
        assert_eq!(
            Action::ToggleUnit(TemperatureUnit::Fahrenheit).to_string(),
            "Toggle temperature unit (Fahrenheit)"
        );
    }

    #[test]
    fn cancelled_prompt_is_not_an_error() {
        let result: Result<String, InquireError> = Err(InquireError::OperationCanceled);
        assert!(answered(result).unwrap().is_none());

        let failed: Result<String, InquireError> = Err(InquireError::NotTTY);
        assert!(answered(failed).is_err());
    }
}
