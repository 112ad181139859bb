use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    Config,
    error::{TransportError, WeatherError},
    model::{Coordinate, CurrentWeather, Forecast, ForecastPoint, WeatherQuery},
};

use super::WeatherService;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Fails with [`WeatherError::Config`] when no API key is set, before any request is made.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let api_key = config.api_key()?;
        Ok(Self::new(api_key, config.base_url()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(endpoint, ?params, "Sending OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .inspect_err(|err| tracing::warn!(endpoint, "OpenWeather request failed: {err}"))?;

        let status = res.status();
        let body = res.text().await.map_err(reqwest::Error::without_url)?;

        if status == StatusCode::NOT_FOUND {
            tracing::info!(endpoint, ?params, "OpenWeather reported no match");
            return Err(WeatherError::CityNotFound);
        }

        if !status.is_success() {
            tracing::warn!(endpoint, %status, "OpenWeather returned an error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(endpoint, "Failed to parse OpenWeather response: {err}");
            WeatherError::from(TransportError::Decode(err))
        })
    }
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<CurrentWeather, WeatherError> {
        let params = match query {
            WeatherQuery::City(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(WeatherError::CityNotFound);
                }
                vec![("q", name.to_string())]
            }
            WeatherQuery::Coordinate(coord) => coordinate_params(*coord),
        };

        let parsed: OwCurrentResponse = self.get("weather", &params).await?;
        Ok(parsed.into())
    }

    async fn forecast(&self, coordinate: Coordinate) -> Result<Forecast, WeatherError> {
        let parsed: OwForecastResponse =
            self.get("forecast", &coordinate_params(coordinate)).await?;

        Ok(Forecast::new(parsed.list.into_iter().map(ForecastPoint::from).collect()))
    }
}

fn coordinate_params(coord: Coordinate) -> Vec<(&'static str, String)> {
    vec![("lat", coord.lat.to_string()), ("lon", coord.lon.to_string())]
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
    #[serde(default)]
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize, Default)]
struct OwWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

impl OwWind {
    fn direction(&self) -> u16 {
        self.deg.rem_euclid(360.0).round() as u16 % 360
    }
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    visibility: u32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(raw: OwCurrentResponse) -> Self {
        let condition = raw.weather.into_iter().next();
        let wind_direction_deg = raw.wind.direction();
        let (summary, description, icon) = condition
            .map(|w| (w.main, w.description, w.icon))
            .unwrap_or_default();

        CurrentWeather {
            location_name: raw.name,
            coordinate: Coordinate { lat: raw.coord.lat, lon: raw.coord.lon },
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            humidity_pct: raw.main.humidity,
            pressure_hpa: raw.main.pressure,
            wind_speed_mps: raw.wind.speed,
            wind_direction_deg,
            visibility_m: raw.visibility,
            condition_summary: summary,
            condition_description: description,
            condition_icon_id: icon,
        }
    }
}

impl From<OwForecastEntry> for ForecastPoint {
    fn from(raw: OwForecastEntry) -> Self {
        let wind_direction_deg = raw.wind.direction();
        let (description, icon) = raw
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_default();

        ForecastPoint {
            timestamp: raw.dt,
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            humidity_pct: raw.main.humidity,
            pressure_hpa: raw.main.pressure,
            wind_speed_mps: raw.wind.speed,
            wind_direction_deg,
            condition_description: description,
            condition_icon_id: icon,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
