//! Plain-text views over [`ViewState`].

use std::fmt::{self, Display};

use chrono::{NaiveDate, TimeZone};
use citycast_core::{
    CurrentWeather, Forecast, Locale, Message, Status, TemperatureUnit, ThemeMode, ViewState,
    assets::{self, MapMarker},
    date_format::{format_date_in, format_time},
    units::{format_temperature, visibility_km},
};

/// Render-time settings. Changing them never triggers a fetch.
#[derive(Debug, Clone)]
pub struct Renderer<Tz> {
    pub unit: TemperatureUnit,
    pub locale: Locale,
    pub theme: ThemeMode,
    pub tz: Tz,
}

impl<Tz> Renderer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn page<'a>(&'a self, state: &'a ViewState, date: Option<NaiveDate>) -> Page<'a, Tz> {
        Page { renderer: self, state, date }
    }

    fn t(&self, message: Message) -> &'static str {
        message.text(self.locale)
    }

    fn temp(&self, temp_c: f64) -> String {
        format_temperature(temp_c, self.unit)
    }

    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The toggle shows the theme you would switch to.
        let toggle = match self.theme {
            ThemeMode::Light => "🌙",
            ThemeMode::Dark => "🌞",
        };
        writeln!(f, "🌤️  Weather App · {}  [{toggle}]", self.t(Message::CurrentWeather))
    }

    fn weather_card(&self, f: &mut fmt::Formatter<'_>, weather: &CurrentWeather) -> fmt::Result {
        writeln!(
            f,
            "{}  {}  {}",
            weather.location_name,
            self.temp(weather.temperature_c),
            weather.condition_description
        )?;
        writeln!(f, "  {}: {}", self.t(Message::FeelsLike), self.temp(weather.feels_like_c))?;
        writeln!(f, "  {}: {}%", self.t(Message::Humidity), weather.humidity_pct)?;
        writeln!(f, "  {}: {} hPa", self.t(Message::Pressure), weather.pressure_hpa)?;
        writeln!(
            f,
            "  {}: {} m/s ({}°)",
            self.t(Message::WindSpeed),
            weather.wind_speed_mps,
            weather.wind_direction_deg
        )?;
        writeln!(f, "  {}: {} km", self.t(Message::Visibility), visibility_km(weather.visibility_m))?;
        if !weather.condition_icon_id.is_empty() {
            writeln!(f, "  {}", assets::icon_url(&weather.condition_icon_id))?;
        }

        let marker = MapMarker::new(
            weather.coordinate,
            format!("{} {}", weather.location_name, self.temp(weather.temperature_c)),
        );
        writeln!(f, "  📍 {} ({})", marker.label, marker.coordinate)?;
        writeln!(f, "  {}  {}", marker.tile_url(), assets::MAP_ATTRIBUTION)
    }

    fn daily_list(&self, f: &mut fmt::Formatter<'_>, forecast: &Forecast) -> fmt::Result {
        writeln!(f, "{}", self.t(Message::Forecast))?;
        for point in forecast.daily(&self.tz) {
            let date = format_date_in(point.timestamp, self.locale, &self.tz).unwrap_or_default();
            writeln!(
                f,
                "  {date:<28} {:>6}  {}",
                self.temp(point.temperature_c),
                point.condition_description
            )?;
        }
        Ok(())
    }

    fn hourly_detail(
        &self,
        f: &mut fmt::Formatter<'_>,
        forecast: &Forecast,
        date: NaiveDate,
    ) -> fmt::Result {
        let points = forecast.on_date(date, &self.tz);
        let title = points
            .first()
            .and_then(|p| format_date_in(p.timestamp, self.locale, &self.tz))
            .unwrap_or_else(|| date.to_string());

        writeln!(f, "{} · {title}", self.t(Message::HourlyForecast))?;
        if points.is_empty() {
            return writeln!(f, "  -");
        }

        for point in points {
            writeln!(
                f,
                "  {}  {:>6}  {}: {}  {}: {}%  {}: {} m/s  {}",
                format_time(point.timestamp, &self.tz).unwrap_or_default(),
                self.temp(point.temperature_c),
                self.t(Message::FeelsLike),
                self.temp(point.feels_like_c),
                self.t(Message::Humidity),
                point.humidity_pct,
                self.t(Message::WindSpeed),
                point.wind_speed_mps,
                point.condition_description,
            )?;
        }
        Ok(())
    }
}

pub struct Page<'a, Tz> {
    renderer: &'a Renderer<Tz>,
    state: &'a ViewState,
    date: Option<NaiveDate>,
}

impl<Tz> Display for Page<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.renderer;
        r.header(f)?;
        writeln!(f)?;

        if let Some(message) = self.state.error_message(r.locale) {
            writeln!(f, "{}: {message}", r.t(Message::Error))?;
            writeln!(f)?;
        }

        if self.state.status == Status::Loading && self.state.weather.is_none() {
            return writeln!(f, "{}", r.t(Message::Loading));
        }

        if let Some(weather) = &self.state.weather {
            r.weather_card(f, weather)?;
            writeln!(f)?;
        }

        match (&self.state.forecast, self.date) {
            (Some(forecast), Some(date)) => r.hourly_detail(f, forecast, date),
            (Some(forecast), None) => r.daily_list(f, forecast),
            (None, _) if self.state.is_loading() => writeln!(f, "{}", r.t(Message::Loading)),
            (None, _) => Ok(()),
        }
    }
}
