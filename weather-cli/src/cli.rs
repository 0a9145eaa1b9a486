use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use tokio::task::JoinHandle;
use weather_core::{
    Config, FetchState, FileCityStore, LastCityStore, WeatherRepository, WeatherSession,
    provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name; defaults to the last successfully searched city.
        city: Option<String>,
    },

    /// Show current weather for a latitude/longitude pair.
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Print the last successfully searched city.
    Last,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let session = open_session()?;
                let handle = match city {
                    Some(city) => session
                        .search(&city)
                        .ok_or_else(|| anyhow!("City name must not be blank"))?,
                    None => {
                        let (city, handle) = session.restore().await.ok_or_else(|| {
                            anyhow!(
                                "No city given and no previous search stored.\n\
                                 Hint: run `weather show <city>`."
                            )
                        })?;
                        tracing::debug!(city = %city, "Restored last searched city");
                        println!("Using last searched city: {city}");
                        handle
                    }
                };
                report(&session, handle, "Searched city not found").await
            }
            Command::Locate { lat, lon } => {
                let session = open_session()?;
                let handle = session.locate(lat, lon);
                report(&session, handle, "Current location weather not found").await
            }
            Command::Last => {
                let store = FileCityStore::in_data_dir()?;
                match store.get().await.context("Failed to read last city")? {
                    Some(city) => println!("{city}"),
                    None => println!("No city searched yet."),
                }
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn open_session() -> anyhow::Result<WeatherSession> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let store = Arc::new(FileCityStore::in_data_dir()?);
    Ok(WeatherSession::new(WeatherRepository::new(provider, store)))
}

/// Wait for the fetch to finish and print whatever the slot ends up holding.
async fn report(
    session: &WeatherSession,
    handle: JoinHandle<()>,
    not_found: &str,
) -> anyhow::Result<()> {
    println!("{}", render::loading());
    handle.await.context("Weather fetch task panicked")?;

    match session.current() {
        FetchState::Success(snapshot) => {
            tracing::debug!(location = %snapshot.location_name, "Rendering weather");
            println!("{}", render::snapshot(&snapshot));
            Ok(())
        }
        FetchState::Failure(message) => {
            tracing::debug!(error = %message, "Fetch ended in failure");
            Err(anyhow!(render::failure(not_found, &message)))
        }
        FetchState::Loading => Err(anyhow!("Weather fetch ended without a result")),
    }
}
