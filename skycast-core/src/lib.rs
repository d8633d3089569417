//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Shared domain models (coordinates, snapshots, condition categories)
//! - Geocoding and weather clients behind the [`Geocoder`] and [`WeatherSource`] traits
//! - The [`ResolutionController`] that chains them and owns the live state
//! - Unit conversion and a render-ready [`Screen`]
//! - Configuration & credentials handling
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod provider;
pub mod units;
pub mod view;

pub use condition::classify;
pub use config::Config;
pub use controller::{ResolutionController, ResolutionState};
pub use error::{FailureReason, ResolveError};
pub use model::{
    ConditionCategory, Coordinates, ForecastDay, TemperatureUnit, WeatherSnapshot, WeekdayLocale,
};
pub use provider::{Geocoder, Providers, WeatherSource, providers_from_config};
pub use units::{DisplayValue, convert};
pub use view::{ForecastView, Screen, SnapshotView};
