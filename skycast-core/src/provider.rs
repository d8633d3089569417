use crate::{
    Config,
    error::ResolveError,
    model::{Coordinates, WeatherSnapshot},
    provider::{geocoding::GeocodingClient, onecall::WeatherClient},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc};

pub mod geocoding;
pub mod onecall;

/// Resolves free text to a single best-match coordinate pair.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, query: &str) -> Result<Coordinates, ResolveError>;
}

/// Fetches and normalizes current conditions plus the daily outlook.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, coords: Coordinates) -> Result<WeatherSnapshot, ResolveError>;
}

/// Both OpenWeather clients, sharing one HTTP connection pool.
#[derive(Debug, Clone)]
pub struct Providers {
    pub geocoder: Arc<dyn Geocoder>,
    pub weather: Arc<dyn WeatherSource>,
}

/// Construct the OpenWeather clients from config.
pub fn providers_from_config(config: &Config) -> anyhow::Result<Providers> {
    let api_key = config.api_key()?;

    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    let http = builder.build().context("Failed to build HTTP client")?;

    let geocoder = GeocodingClient::new(http.clone(), api_key, &config.endpoints.geocoding);
    let weather = WeatherClient::new(http, api_key, &config.endpoints.onecall, config.locale);

    Ok(Providers {
        geocoder: Arc::new(geocoder),
        weather: Arc::new(weather),
    })
}

/// Cap on how much of an error body ends up in messages.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = providers_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn providers_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(providers_from_config(&cfg).is_ok());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let short = "not found";
        assert_eq!(truncate_body(short), short);

        let long = "ż".repeat(150);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 203);
    }
}
