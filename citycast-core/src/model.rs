use chrono::{NaiveDate, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date_format::to_zoned;

pub const DEFAULT_CITY: &str = "Istanbul";
pub const DEFAULT_COORDINATE: Coordinate = Coordinate { lat: 41.0082, lon: 28.9784 };

const NOON_SECS: i64 = 12 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> anyhow::Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            anyhow::bail!("Latitude {lat} is out of range (-90..=90)");
        }
        if !(-180.0..=180.0).contains(&lon) {
            anyhow::bail!("Longitude {lon} is out of range (-180..=180)");
        }
        Ok(Self { lat, lon })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// What the user asked weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coordinate(Coordinate),
}

impl WeatherQuery {
    pub fn city(name: impl Into<String>) -> Self {
        WeatherQuery::City(name.into().trim().to_string())
    }
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherQuery::City(name) => f.write_str(name),
            WeatherQuery::Coordinate(coord) => write!(f, "({coord})"),
        }
    }
}

/// Current conditions, metric units throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub coordinate: Coordinate,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: u16,
    pub visibility_m: u32,
    pub condition_summary: String,
    pub condition_description: String,
    pub condition_icon_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: i64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: u16,
    pub condition_description: String,
    pub condition_icon_id: String,
}

/// Chronological forecast points, usually 3-hourly over five days.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub points: Vec<ForecastPoint>,
}

impl Forecast {
    pub fn new(mut points: Vec<ForecastPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// One point per local calendar day: the one closest to noon.
    pub fn daily<Tz: TimeZone>(&self, tz: &Tz) -> Vec<&ForecastPoint> {
        let mut days: Vec<(NaiveDate, i64, &ForecastPoint)> = Vec::new();

        for point in &self.points {
            let Some(local) = to_zoned(point.timestamp, tz) else {
                continue;
            };
            let date = local.date_naive();
            let distance = (i64::from(local.num_seconds_from_midnight()) - NOON_SECS).abs();

            match days.iter_mut().find(|(day, _, _)| *day == date) {
                Some(entry) if distance < entry.1 => {
                    entry.1 = distance;
                    entry.2 = point;
                }
                Some(_) => {}
                None => days.push((date, distance, point)),
            }
        }

        days.into_iter().map(|(_, _, point)| point).collect()
    }

    /// Every point that falls on `date` in the given timezone.
    pub fn on_date<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Vec<&ForecastPoint> {
        self.points
            .iter()
            .filter(|p| to_zoned(p.timestamp, tz).is_some_and(|local| local.date_naive() == date))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn point(timestamp: i64, temperature_c: f64) -> ForecastPoint {
        ForecastPoint {
            timestamp,
            temperature_c,
            feels_like_c: temperature_c,
            humidity_pct: 50,
            pressure_hpa: 1013,
            wind_speed_mps: 3.0,
            wind_direction_deg: 180,
            condition_description: "clear sky".into(),
            condition_icon_id: "01d".into(),
        }
    }

    pub fn weather(name: &str, coordinate: Coordinate, temperature_c: f64) -> CurrentWeather {
        CurrentWeather {
            location_name: name.into(),
            coordinate,
            temperature_c,
            feels_like_c: temperature_c,
            humidity_pct: 60,
            pressure_hpa: 1012,
            wind_speed_mps: 4.1,
            wind_direction_deg: 90,
            visibility_m: 10_000,
            condition_summary: "Clear".into(),
            condition_description: "clear sky".into(),
            condition_icon_id: "01d".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::point;
    use super::*;
    use chrono::{FixedOffset, Utc};

    // 2025-01-15 00:00:00 UTC
    const JAN_15: i64 = 1_736_899_200;
    const HOUR: i64 = 3600;

    fn three_hourly(start: i64, count: i64) -> Forecast {
        Forecast::new((0..count).map(|i| point(start + i * 3 * HOUR, i as f64)).collect())
    }

    #[test]
    fn coordinate_validation() {
        assert!(Coordinate::new(41.0082, 28.9784).is_ok());
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn city_query_is_trimmed() {
        assert_eq!(WeatherQuery::city("  Baku "), WeatherQuery::City("Baku".into()));
    }

    #[test]
    fn points_are_sorted() {
        let forecast = Forecast::new(vec![point(JAN_15 + HOUR, 1.0), point(JAN_15, 0.0)]);
        assert_eq!(forecast.points[0].timestamp, JAN_15);
    }

    #[test]
    fn daily_picks_noon_entry_per_day() {
        let forecast = three_hourly(JAN_15, 16);
        let daily = forecast.daily(&Utc);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].timestamp, JAN_15 + 12 * HOUR);
        assert_eq!(daily[1].timestamp, JAN_15 + 36 * HOUR);
    }

    #[test]
    fn daily_falls_back_to_closest_to_noon() {
        // UTC+1: entries land on 01:00, 04:00, ... so 13:00 is nearest to noon.
        let tz = FixedOffset::east_opt(HOUR as i32).unwrap();
        let forecast = three_hourly(JAN_15, 8);
        let daily = forecast.daily(&tz);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].timestamp, JAN_15 + 12 * HOUR);
    }

    #[test]
    fn on_date_filters_by_local_day() {
        let forecast = three_hourly(JAN_15, 16);
        let day = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();

        let hourly = forecast.on_date(day, &Utc);
        assert_eq!(hourly.len(), 8);
        assert!(hourly.iter().all(|p| p.timestamp >= JAN_15 + 24 * HOUR));
    }
}
