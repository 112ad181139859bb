use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    WeatherError,
    model::{Coordinate, CurrentWeather, Forecast, WeatherQuery},
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Upstream weather data, normalized to metric units.
///
/// Each call performs exactly one request. Nothing is retried or cached here.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    /// Current conditions for a city name or a coordinate.
    ///
    /// # Errors
    ///
    /// [`WeatherError::CityNotFound`] when upstream has no match,
    /// [`WeatherError::Transport`] for any other failure.
    async fn current_weather(&self, query: &WeatherQuery) -> Result<CurrentWeather, WeatherError>;

    /// Multi-day forecast at a coordinate already resolved by [`Self::current_weather`].
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::current_weather`]; a 404 is reported as
    /// [`WeatherError::CityNotFound`].
    async fn forecast(&self, coordinate: Coordinate) -> Result<Forecast, WeatherError>;
}
