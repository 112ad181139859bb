//! Sequencing of the current-weather and forecast calls.
//!
//! Every query gets a generation number. State updates carrying an older
//! generation than the latest issued one are dropped, so a slow response to
//! an old query can never overwrite a newer one.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;

use crate::{
    WeatherError,
    client::WeatherService,
    i18n::{Locale, Message},
    location::{Geolocator, LocationError},
    model::{Coordinate, CurrentWeather, Forecast, WeatherQuery},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub generation: u64,
    pub query: Option<WeatherQuery>,
    pub status: Status,
    pub weather: Option<CurrentWeather>,
    pub forecast: Option<Forecast>,
    pub error: Option<Arc<WeatherError>>,
}

impl ViewState {
    /// Localized text for "city not found", the raw error text for everything else.
    pub fn error_message(&self, locale: Locale) -> Option<String> {
        let err = self.error.as_deref()?;
        Some(match err {
            WeatherError::CityNotFound => Message::CityNotFound.text(locale).to_string(),
            other => other.to_string(),
        })
    }

    pub fn can_retry(&self) -> bool {
        self.error.as_deref().is_some_and(WeatherError::is_retryable)
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }
}

/// Owns the query selection and drives [`WeatherService`] calls.
///
/// Single writer: only the orchestrator mutates [`ViewState`]; any number of
/// readers can [`subscribe`](Self::subscribe).
#[derive(Debug)]
pub struct Orchestrator<S: WeatherService + ?Sized> {
    service: Arc<S>,
    generation: AtomicU64,
    state: watch::Sender<ViewState>,
}

impl<S: WeatherService + ?Sized> Orchestrator<S> {
    pub fn new(service: Arc<S>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            service,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Look up a city by name, then fetch its forecast.
    pub async fn search(&self, city: impl Into<String>) -> ViewState {
        self.run(WeatherQuery::city(city)).await
    }

    /// Reverse lookup for a coordinate, then fetch its forecast.
    pub async fn search_coordinate(&self, coordinate: Coordinate) -> ViewState {
        self.run(WeatherQuery::Coordinate(coordinate)).await
    }

    /// Query at the device position, or `fallback_city` if no position is available.
    pub async fn locate<G>(&self, geolocator: &G, fallback_city: &str) -> ViewState
    where
        G: Geolocator + ?Sized,
    {
        match geolocator.locate().await {
            Ok(coordinate) => self.search_coordinate(coordinate).await,
            Err(LocationError::Unavailable) => {
                tracing::info!(fallback_city, "No position source, using default city");
                self.search(fallback_city).await
            }
            Err(err) => {
                tracing::warn!(fallback_city, "Geolocation failed, using default city: {err}");
                self.search(fallback_city).await
            }
        }
    }

    /// Re-run the most recent query. `None` if nothing was queried yet.
    pub async fn retry(&self) -> Option<ViewState> {
        let query = self.state.borrow().query.clone()?;
        Some(self.run(query).await)
    }

    /// Fetch a fresh forecast for the weather already on display.
    ///
    /// Does nothing while a query is still loading; that query's own
    /// forecast call is the only one it gets.
    ///
    /// # Errors
    ///
    /// [`WeatherError::NoCoordinateAvailable`] when no current weather has
    /// been loaded. State is left untouched in that case.
    pub async fn refresh_forecast(&self) -> Result<ViewState, WeatherError> {
        let mut target = None;
        let mut busy = false;
        self.state.send_if_modified(|state| {
            if state.status == Status::Loading {
                busy = true;
                return false;
            }
            let Some(weather) = &state.weather else {
                return false;
            };
            let generation = self.next_generation();
            target = Some((generation, weather.coordinate));

            state.generation = generation;
            state.status = Status::Loading;
            state.forecast = None;
            state.error = None;
            true
        });

        if busy {
            tracing::debug!("Query still loading, not refreshing forecast");
            return Ok(self.state());
        }

        let Some((generation, coordinate)) = target else {
            tracing::error!("Forecast refresh requested without a resolved coordinate");
            return Err(WeatherError::NoCoordinateAvailable);
        };

        self.fetch_forecast(generation, coordinate).await;
        Ok(self.state())
    }

    async fn run(&self, query: WeatherQuery) -> ViewState {
        let generation = self.next_generation();
        tracing::info!(generation, %query, "Starting weather query");

        self.publish(generation, |state| {
            *state = ViewState {
                generation,
                query: Some(query.clone()),
                status: Status::Loading,
                ..ViewState::default()
            };
        });

        let weather = match self.service.current_weather(&query).await {
            Ok(weather) => weather,
            Err(err) => {
                self.fail(generation, err);
                return self.state();
            }
        };

        let coordinate = weather.coordinate;
        let current = self.publish(generation, |state| state.weather = Some(weather));
        if !current {
            tracing::debug!(generation, "Query superseded before forecast, skipping it");
            return self.state();
        }

        self.fetch_forecast(generation, coordinate).await;
        self.state()
    }

    async fn fetch_forecast(&self, generation: u64, coordinate: Coordinate) {
        match self.service.forecast(coordinate).await {
            Ok(forecast) => {
                self.publish(generation, |state| {
                    state.forecast = Some(forecast);
                    state.status = Status::Loaded;
                });
            }
            Err(err) => self.fail(generation, err),
        }
    }

    fn fail(&self, generation: u64, err: WeatherError) {
        tracing::warn!(generation, "Weather query failed: {err}");
        self.publish(generation, |state| {
            state.status = Status::Error;
            state.error = Some(Arc::new(err));
        });
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply `update` only if `generation` is still the latest. Returns whether it was applied.
    fn publish(&self, generation: u64, update: impl FnOnce(&mut ViewState)) -> bool {
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            update(state);
            true
        });

        if !applied {
            tracing::debug!(generation, "Discarding stale update");
        }
        applied
    }
}
