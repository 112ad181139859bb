use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use citycast_core::{
    Config, Coordinate, FileStore, Locale, Message, OpenWeatherClient, Orchestrator, Preferences,
    Status, TemperatureUnit, ThemeMode,
    location::FixedLocation,
};
use inquire::{Confirm, Password, PasswordDisplayMode, Text};

use crate::render::Renderer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Show current weather and forecast.
    ///
    /// Without a city or position, the configured default city is used.
    Show {
        /// City name, e.g. "Istanbul".
        city: Option<String>,

        /// Latitude of the position to show.
        #[arg(long, requires = "lon", conflicts_with = "city", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the position to show.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Show the hourly forecast for this day (YYYY-MM-DD) instead of the daily list.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Do not offer to try again after a failure.
        #[arg(long)]
        no_retry: bool,
    },

    /// Change a preference.
    Set {
        #[command(subcommand)]
        setting: Setting,
    },

    /// Flip the temperature unit or the theme.
    Toggle { target: ToggleTarget },

    /// Print the current preferences.
    Prefs,
}

#[derive(Debug, Subcommand)]
pub enum Setting {
    /// celsius or fahrenheit
    Unit { unit: TemperatureUnit },
    /// en, tr or az
    Language { locale: Locale },
    /// light or dark
    Theme { theme: ThemeMode },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ToggleTarget {
    Unit,
    Theme,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure()?,
            Command::Show { city, lat, lon, date, no_retry } => {
                let position = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)?),
                    _ => None,
                };
                return show(city, position, date, !no_retry).await;
            }
            Command::Set { setting } => {
                let mut prefs = load_preferences()?;
                match setting {
                    Setting::Unit { unit } => prefs.set_temperature_unit(unit)?,
                    Setting::Language { locale } => prefs.set_locale(locale)?,
                    Setting::Theme { theme } => prefs.set_theme(theme)?,
                }
                print_preferences(&prefs);
            }
            Command::Toggle { target } => {
                let mut prefs = load_preferences()?;
                match target {
                    ToggleTarget::Unit => {
                        prefs.toggle_temperature_unit()?;
                    }
                    ToggleTarget::Theme => {
                        prefs.toggle_theme()?;
                    }
                }
                print_preferences(&prefs);
            }
            Command::Prefs => print_preferences(&load_preferences()?),
        }

        Ok(ExitCode::SUCCESS)
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;

    config.set_api_key(api_key);
    config.default_city = Some(default_city.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    city: Option<String>,
    position: Option<Coordinate>,
    date: Option<NaiveDate>,
    offer_retry: bool,
) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let prefs = load_preferences()?;
    tracing::debug!(
        base_url = config.base_url(),
        unit = %prefs.temperature_unit(),
        locale = %prefs.locale(),
        "Loaded configuration"
    );

    // Missing credentials end the session before any request is made.
    let client = OpenWeatherClient::from_config(&config)?;
    let orchestrator = Orchestrator::new(Arc::new(client));

    let renderer = Renderer {
        unit: prefs.temperature_unit(),
        locale: prefs.locale(),
        theme: prefs.theme(),
        tz: Local,
    };

    let mut state = match start_query(city, position, config.default_city()) {
        StartQuery::City(city) => orchestrator.search(city).await,
        StartQuery::Position(coordinate) => {
            orchestrator.locate(&FixedLocation(coordinate), config.default_city()).await
        }
    };

    loop {
        print!("{}", renderer.page(&state, date));

        if state.status != Status::Error {
            return Ok(ExitCode::SUCCESS);
        }
        if !(offer_retry && state.can_retry() && confirm_retry(renderer.locale)) {
            return Ok(ExitCode::FAILURE);
        }

        state = match orchestrator.retry().await {
            Some(next) => next,
            None => return Ok(ExitCode::FAILURE),
        };
    }
}

#[derive(Debug, PartialEq)]
enum StartQuery {
    City(String),
    Position(Coordinate),
}

/// A terminal has no position source, so without arguments the default city is queried directly.
fn start_query(city: Option<String>, position: Option<Coordinate>, default_city: &str) -> StartQuery {
    match (city, position) {
        (Some(city), _) => StartQuery::City(city),
        (None, Some(coordinate)) => StartQuery::Position(coordinate),
        (None, None) => StartQuery::City(default_city.to_string()),
    }
}

/// Any prompt failure (e.g. no terminal attached) counts as "no".
fn confirm_retry(locale: Locale) -> bool {
    Confirm::new(&format!("{}?", Message::TryAgain.text(locale)))
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}

fn load_preferences() -> anyhow::Result<Preferences<FileStore>> {
    Ok(Preferences::load(FileStore::open_default()?))
}

fn print_preferences(prefs: &Preferences<FileStore>) {
    let locale = prefs.locale();
    let unit = match prefs.temperature_unit() {
        TemperatureUnit::Celsius => Message::Celsius,
        TemperatureUnit::Fahrenheit => Message::Fahrenheit,
    };
    let theme = match prefs.theme() {
        ThemeMode::Light => Message::Light,
        ThemeMode::Dark => Message::Dark,
    };

    println!("{}: {} ({})", Message::Language.text(locale), locale.native_name(), locale);
    println!("{}: {}", Message::TemperatureUnit.text(locale), unit.text(locale));
    println!("{}: {}", Message::Theme.text(locale), theme.text(locale));
}
