//! Static translation table for the three supported languages.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
    Az,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Tr => "tr",
            Locale::Az => "az",
        }
    }

    /// Name of the language in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Tr => "Türkçe",
            Locale::Az => "Azərbaycan",
        }
    }

    pub const fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Tr, Locale::Az]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "tr" => Ok(Locale::Tr),
            "az" => Ok(Locale::Az),
            _ => Err(anyhow::anyhow!(
                "Unknown language '{value}'. Supported languages: en, tr, az."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    CurrentWeather,
    Forecast,
    Search,
    Temperature,
    Humidity,
    WindSpeed,
    FeelsLike,
    Pressure,
    Error,
    Loading,
    Language,
    Theme,
    Dark,
    Light,
    CityNotFound,
    HourlyForecast,
    Back,
    Visibility,
    TryAgain,
    Home,
    Settings,
    TemperatureUnit,
    Celsius,
    Fahrenheit,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en(),
            Locale::Tr => self.tr(),
            Locale::Az => self.az(),
        }
    }

    fn en(self) -> &'static str {
        match self {
            Message::CurrentWeather => "Current Weather",
            Message::Forecast => "7-Day Forecast",
            Message::Search => "Search",
            Message::Temperature => "Temperature",
            Message::Humidity => "Humidity",
            Message::WindSpeed => "Wind Speed",
            Message::FeelsLike => "Feels Like",
            Message::Pressure => "Pressure",
            Message::Error => "Error",
            Message::Loading => "Loading...",
            Message::Language => "Language",
            Message::Theme => "Theme",
            Message::Dark => "Dark",
            Message::Light => "Light",
            Message::CityNotFound => "City not found. Please try another city.",
            Message::HourlyForecast => "Hourly Forecast",
            Message::Back => "Back",
            Message::Visibility => "Visibility",
            Message::TryAgain => "Try Again",
            Message::Home => "Home",
            Message::Settings => "Settings",
            Message::TemperatureUnit => "Temperature Unit",
            Message::Celsius => "Celsius",
            Message::Fahrenheit => "Fahrenheit",
        }
    }

    fn tr(self) -> &'static str {
        match self {
            Message::CurrentWeather => "Mevcut Hava Durumu",
            Message::Forecast => "7 Günlük Tahmin",
            Message::Search => "Ara",
            Message::Temperature => "Sıcaklık",
            Message::Humidity => "Nem",
            Message::WindSpeed => "Rüzgar Hızı",
            Message::FeelsLike => "Hissedilen",
            Message::Pressure => "Basınç",
            Message::Error => "Hata",
            Message::Loading => "Yükleniyor...",
            Message::Language => "Dil",
            Message::Theme => "Tema",
            Message::Dark => "Karanlık",
            Message::Light => "Aydınlık",
            Message::CityNotFound => "Şehir bulunamadı. Lütfen başka bir şehir deneyin.",
            Message::HourlyForecast => "Saatlik Tahmin",
            Message::Back => "Geri",
            Message::Visibility => "Görüş Mesafesi",
            Message::TryAgain => "Tekrar Dene",
            Message::Home => "Ana Sayfa",
            Message::Settings => "Ayarlar",
            Message::TemperatureUnit => "Sıcaklık Birimi",
            Message::Celsius => "Celsius",
            Message::Fahrenheit => "Fahrenheit",
        }
    }

    fn az(self) -> &'static str {
        match self {
            Message::CurrentWeather => "Cari Hava",
            Message::Forecast => "7 Günlük Proqnoz",
            Message::Search => "Axtar",
            Message::Temperature => "Temperatur",
            Message::Humidity => "Rütubət",
            Message::WindSpeed => "Külək Sürəti",
            Message::FeelsLike => "Hiss Olunan",
            Message::Pressure => "Təzyiq",
            Message::Error => "Xəta",
            Message::Loading => "Yüklənir...",
            Message::Language => "Dil",
            Message::Theme => "Tema",
            Message::Dark => "Qaranlıq",
            Message::Light => "İşıqlı",
            Message::CityNotFound => "Şəhər tapılmadı. Zəhmət olmasa başqa bir şəhər sınayın.",
            Message::HourlyForecast => "Saatlıq Proqnoz",
            Message::Back => "Geri",
            Message::Visibility => "Görünüş Məsafəsi",
            Message::TryAgain => "Yenidən Cəhd Edin",
            Message::Home => "Ana Səhifə",
            Message::Settings => "Parametrlər",
            Message::TemperatureUnit => "Temperatur Vahidi",
            Message::Celsius => "Selsi",
            Message::Fahrenheit => "Farenheit",
        }
    }
}
