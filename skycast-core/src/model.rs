use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// A resolved point on the globe. Immutable once produced by a geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Display categories the provider vocabulary is folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConditionCategory {
    Clear,
    Rain,
    Snow,
    Clouds,
    Mist,
    #[default]
    Unknown,
}

/// Temperature unit the user has selected for display.
///
/// Values are always stored in Celsius; the unit only affects rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    #[serde(alias = "C")]
    C,
    #[serde(alias = "F")]
    F,
}

impl TemperatureUnit {
    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::C => TemperatureUnit::F,
            TemperatureUnit::F => TemperatureUnit::C,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::C => "C",
            TemperatureUnit::F => "F",
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::C),
            "f" | "fahrenheit" => Ok(TemperatureUnit::F),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: c, f."
            )),
        }
    }
}

/// Language used for forecast weekday labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayLocale {
    #[default]
    Pl,
    En,
}

impl WeekdayLocale {
    /// Short weekday label, as a browser renders `{ weekday: 'short' }`.
    pub fn short_label(self, day: Weekday) -> &'static str {
        match self {
            WeekdayLocale::Pl => match day {
                Weekday::Mon => "pon.",
                Weekday::Tue => "wt.",
                Weekday::Wed => "śr.",
                Weekday::Thu => "czw.",
                Weekday::Fri => "pt.",
                Weekday::Sat => "sob.",
                Weekday::Sun => "niedz.",
            },
            WeekdayLocale::En => match day {
                Weekday::Mon => "Mon",
                Weekday::Tue => "Tue",
                Weekday::Wed => "Wed",
                Weekday::Thu => "Thu",
                Weekday::Fri => "Fri",
                Weekday::Sat => "Sat",
                Weekday::Sun => "Sun",
            },
        }
    }
}

/// One day of the multi-day outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub label: String,
    pub temperature_c: f64,
    pub condition: ConditionCategory,
}

/// Normalized weather for the current resolution cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub pressure_hpa: f64,
    pub condition: ConditionCategory,
    /// At most [`FORECAST_DAYS`] entries, starting tomorrow.
    pub forecast: Vec<ForecastDay>,
}

pub const FORECAST_DAYS: usize = 5;
