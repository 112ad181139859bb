//! User preferences: temperature unit, language and theme.
//!
//! Each value is read once when [`Preferences::load`] runs and written back
//! to the store on every change.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{self, Debug},
    fs,
    path::PathBuf,
    str::FromStr,
};

use crate::{Config, i18n::Locale, units::TemperatureUnit};

pub const UNIT_KEY: &str = "temperatureUnit";
pub const LANGUAGE_KEY: &str = "language";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(anyhow::anyhow!("Unknown theme '{value}'. Supported themes: light, dark.")),
        }
    }
}

/// Local string key-value storage.
pub trait PreferenceStore: Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store; nothing survives the session.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat TOML table of strings on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Store in the platform config directory, next to `config.toml`.
    pub fn open_default() -> Result<Self> {
        let path = Config::project_dirs()?.config_dir().join("preferences.toml");
        Self::open(path)
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse preferences: {}", path.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string(&self.values).context("Failed to serialize preferences")?;
        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// The in-memory value only changes once it has been written to disk.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.values.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            match previous {
                Some(previous) => self.values.insert(key.to_string(), previous),
                None => self.values.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }
}

/// The three user preferences plus the store they persist to.
#[derive(Debug)]
pub struct Preferences<S: PreferenceStore> {
    store: S,
    unit: TemperatureUnit,
    locale: Locale,
    theme: ThemeMode,
}

impl<S: PreferenceStore> Preferences<S> {
    /// Read all values from `store`; missing or unreadable entries use defaults.
    pub fn load(store: S) -> Self {
        let unit = read_or_default(&store, UNIT_KEY);
        let locale = read_or_default(&store, LANGUAGE_KEY);
        let theme = read_or_default(&store, THEME_KEY);

        Self { store, unit, locale, theme }
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn set_temperature_unit(&mut self, unit: TemperatureUnit) -> Result<()> {
        self.store.set(UNIT_KEY, unit.as_str())?;
        self.unit = unit;
        Ok(())
    }

    pub fn set_locale(&mut self, locale: Locale) -> Result<()> {
        self.store.set(LANGUAGE_KEY, locale.code())?;
        self.locale = locale;
        Ok(())
    }

    pub fn set_theme(&mut self, theme: ThemeMode) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        Ok(())
    }

    pub fn toggle_temperature_unit(&mut self) -> Result<TemperatureUnit> {
        self.set_temperature_unit(self.unit.toggle())?;
        Ok(self.unit)
    }

    pub fn toggle_theme(&mut self) -> Result<ThemeMode> {
        self.set_theme(self.theme.toggle())?;
        Ok(self.theme)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn read_or_default<T>(store: &impl PreferenceStore, key: &str) -> T
where
    T: FromStr<Err = anyhow::Error> + Default,
{
    match store.get(key) {
        None => T::default(),
        Some(raw) => raw.parse().unwrap_or_else(|err| {
            tracing::warn!(key, value = %raw, "Ignoring stored preference: {err}");
            T::default()
        }),
    }
}
