use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Display unit for temperatures. Upstream data is always Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    /// Convert a Celsius reading to a rounded display value in this unit.
    pub fn convert(&self, temp_c: f64) -> i32 {
        convert(temp_c, *self)
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

/// Rounds half away from zero on both sides of 0, so `-2.5` becomes `-3`.
/// The float-to-int cast saturates; NaN maps to 0.
pub fn convert(temp_c: f64, unit: TemperatureUnit) -> i32 {
    let value = match unit {
        TemperatureUnit::Celsius => temp_c,
        TemperatureUnit::Fahrenheit => temp_c * 9.0 / 5.0 + 32.0,
    };
    value.round() as i32
}

/// e.g. `20°C`
pub fn format_temperature(temp_c: f64, unit: TemperatureUnit) -> String {
    format!("{}{}", convert(temp_c, unit), unit.symbol())
}

pub fn visibility_km(meters: u32) -> f64 {
    f64::from(meters) / 1000.0
}
