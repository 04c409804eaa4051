use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use weather_core::{
    Config, ConsentLocator, DisplayState, LookupError, LookupState, WeatherLookupService,
    WeatherSnapshot, is_demo_name, location::locator_from_config, provider,
};

use crate::{prompt, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city or your location")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the API key, language and default city.
    Configure,

    /// Show weather for a place; `demo` works offline.
    Show {
        /// City name; falls back to the configured default city.
        place: Option<String>,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show weather for a latitude/longitude pair.
    Coords {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        #[arg(long)]
        json: bool,
    },

    /// Show weather for your current (approximate) location.
    Here {
        /// Do not ask before using your location.
        #[arg(long)]
        yes: bool,

        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(Config::load()?),
            Command::Show { place, json } => {
                let config = load_config()?;
                let place = place.unwrap_or_else(|| config.default_city.clone());
                if !is_demo_name(&place) {
                    require_api_key(&config)?;
                }

                let service = WeatherLookupService::new(provider::provider_from_config(&config)?);
                present(service.lookup_by_name(&place), json).await
            }
            Command::Coords {
                latitude,
                longitude,
                json,
            } => {
                let config = load_config()?;
                require_api_key(&config)?;

                let service = WeatherLookupService::new(provider::provider_from_config(&config)?);
                present(service.lookup_by_coordinates(latitude, longitude), json).await
            }
            Command::Here { yes, json } => {
                let config = load_config()?;
                require_api_key(&config)?;

                let http = provider::http_client(&config)?;
                let locator = ConsentLocator::new(
                    locator_from_config(&config, http),
                    prompt::InquireConsent::new(yes),
                );
                let service = WeatherLookupService::with_locator(
                    provider::provider_from_config(&config)?,
                    locator,
                );
                present(service.lookup_current_location(), json).await
            }
        }
    }
}

/// Stored config with environment overrides; never saved back.
fn load_config() -> anyhow::Result<Config> {
    Ok(Config::load()?.with_env_overrides())
}

fn require_api_key(config: &Config) -> anyhow::Result<()> {
    if config.api_key().is_none() {
        bail!(
            "No API key configured.\n\
             Hint: run `weather configure` or set {}.",
            weather_core::config::API_KEY_ENV
        );
    }
    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    prompt::configure(&mut config)?;
    config.save()?;

    let path = Config::config_file_path()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

/// Drive one lookup through the display state and print the outcome.
async fn present(
    lookup: impl Future<Output = Result<WeatherSnapshot, LookupError>>,
    json: bool,
) -> anyhow::Result<()> {
    let mut state = DisplayState::new();
    let ticket = state.begin();
    if !json {
        eprintln!("{}", render::LOADING);
    }

    let result = lookup.await;
    state.resolve(ticket, result);

    match state.current() {
        LookupState::Success {
            snapshot,
            received_at,
        } => {
            if json {
                let out = serde_json::to_string_pretty(snapshot)
                    .context("Failed to serialize snapshot")?;
                println!("{out}");
            } else {
                println!("{}", render::card(snapshot, *received_at));
            }
            Ok(())
        }
        LookupState::Failure(err) => Err(anyhow!(render::error_message(err))),
        LookupState::Idle | LookupState::Loading => Err(anyhow!("Lookup did not complete")),
    }
}
