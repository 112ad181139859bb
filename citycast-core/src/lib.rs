//! Core library for the `citycast` weather app.
//!
//! This crate defines:
//! - The OpenWeather client and its error taxonomy
//! - The orchestrator that chains current weather → forecast
//! - Unit conversion, date formatting and translations used at render time
//! - Configuration and persisted user preferences
//!
//! It is used by `citycast-cli`, but can also be reused by other front ends.

pub mod assets;
pub mod client;
pub mod config;
pub mod date_format;
pub mod error;
pub mod i18n;
pub mod location;
pub mod model;
pub mod orchestrator;
pub mod preferences;
pub mod units;

pub use client::{OpenWeatherClient, WeatherService};
pub use config::Config;
pub use error::{TransportError, WeatherError};
pub use i18n::{Locale, Message};
pub use model::{Coordinate, CurrentWeather, Forecast, ForecastPoint, WeatherQuery};
pub use orchestrator::{Orchestrator, Status, ViewState};
pub use preferences::{FileStore, MemoryStore, PreferenceStore, Preferences, ThemeMode};
pub use units::TemperatureUnit;
