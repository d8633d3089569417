use async_trait::async_trait;
use chrono::{DateTime, Datelike, FixedOffset};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    condition::classify,
    error::ResolveError,
    model::{
        ConditionCategory, Coordinates, FORECAST_DAYS, ForecastDay, WeatherSnapshot, WeekdayLocale,
    },
    provider::truncate_body,
};

use super::WeatherSource;

/// OpenWeather One Call 3.0 (`/data/3.0/onecall`), metric units.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    locale: WeekdayLocale,
    http: Client,
}

impl WeatherClient {
    pub fn new(http: Client, api_key: &str, base_url: &str, locale: WeekdayLocale) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            locale,
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OcWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OcCurrent {
    temp: f64,
    humidity: u8,
    wind_speed: f64,
    pressure: f64,
    #[serde(default)]
    weather: Vec<OcWeather>,
}

#[derive(Debug, Deserialize)]
struct OcDailyTemp {
    day: f64,
}

#[derive(Debug, Deserialize)]
struct OcDaily {
    dt: i64,
    temp: OcDailyTemp,
    #[serde(default)]
    weather: Vec<OcWeather>,
}

#[derive(Debug, Deserialize)]
struct OcResponse {
    /// Seconds east of UTC for the requested location.
    #[serde(default)]
    timezone_offset: i32,
    current: OcCurrent,
    #[serde(default)]
    daily: Vec<OcDaily>,
}

/// Turn a One Call body into a [`WeatherSnapshot`].
///
/// The first daily entry is today and is skipped; up to the next
/// [`FORECAST_DAYS`] entries become the forecast, in provider order.
pub fn normalize(body: &str, locale: WeekdayLocale) -> Result<WeatherSnapshot, ResolveError> {
    let parsed: OcResponse = serde_json::from_str(body)
        .map_err(|e| ResolveError::MalformedResponse(format!("weather JSON: {e}")))?;

    let current = parsed.current;
    if current.humidity > 100 {
        return Err(ResolveError::MalformedResponse(format!(
            "humidity {}% out of range",
            current.humidity
        )));
    }
    if current.wind_speed < 0.0 {
        return Err(ResolveError::MalformedResponse(format!(
            "negative wind speed {}",
            current.wind_speed
        )));
    }
    if current.pressure <= 0.0 {
        return Err(ResolveError::MalformedResponse(format!(
            "non-positive pressure {}",
            current.pressure
        )));
    }

    let offset = FixedOffset::east_opt(parsed.timezone_offset).ok_or_else(|| {
        ResolveError::MalformedResponse(format!(
            "timezone offset {} out of range",
            parsed.timezone_offset
        ))
    })?;

    let forecast = parsed
        .daily
        .iter()
        .skip(1)
        .take(FORECAST_DAYS)
        .map(|day| {
            let date = DateTime::from_timestamp(day.dt, 0).ok_or_else(|| {
                ResolveError::MalformedResponse(format!("daily timestamp {} out of range", day.dt))
            })?;
            Ok(ForecastDay {
                label: locale.short_label(date.with_timezone(&offset).weekday()).to_string(),
                temperature_c: day.temp.day,
                condition: primary_condition(&day.weather),
            })
        })
        .collect::<Result<Vec<_>, ResolveError>>()?;

    Ok(WeatherSnapshot {
        temperature_c: current.temp,
        humidity_pct: current.humidity,
        wind_speed_ms: current.wind_speed,
        pressure_hpa: current.pressure,
        condition: primary_condition(&current.weather),
        forecast,
    })
}

fn primary_condition(weather: &[OcWeather]) -> ConditionCategory {
    weather
        .first()
        .map(|w| classify(&w.main))
        .unwrap_or(ConditionCategory::Unknown)
}

#[async_trait]
impl WeatherSource for WeatherClient {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn fetch(&self, coords: Coordinates) -> Result<WeatherSnapshot, ResolveError> {
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ResolveError::Network(format!(
                "weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        normalize(&body, self.locale)
    }
}
