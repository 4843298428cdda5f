//! Core library for the CWA weather proxy.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The CWA open-data client behind the `WeatherProvider` trait
//! - Forecast reshaping and sunrise/sunset enrichment
//! - Shared response models
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod share;
pub mod sunrise;

pub use config::Config;
pub use error::WeatherError;
pub use model::{ForecastEntry, ForecastFields, SunTimes, WeatherResponse};
pub use provider::{DatasetId, WeatherProvider, http_client, provider_from_config};
pub use share::ShareRequest;
