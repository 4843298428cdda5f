use crate::{
    Config, WeatherError,
    model::{ForecastPayload, SunPayload},
    provider::cwa::CwaProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod cwa;

/// CWA open-data datasets consumed by the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetId {
    /// 一般天氣預報-今明 36 小時天氣預報
    Forecast36h,
    /// 日出日落時刻
    SunriseSunset,
}

impl DatasetId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetId::Forecast36h => "F-C0032-001",
            DatasetId::SunriseSunset => "A-B0062-001",
        }
    }

    /// Query parameter the dataset is keyed by.
    pub fn location_param(&self) -> &'static str {
        match self {
            DatasetId::Forecast36h => "locationName",
            DatasetId::SunriseSunset => "CountyName",
        }
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the 36-hour forecast for a location name.
    async fn forecast(&self, location: &str) -> Result<ForecastPayload, WeatherError>;

    /// Fetch sunrise/sunset times for a county name.
    async fn sun_times(&self, county: &str) -> Result<SunPayload, WeatherError>;
}

/// Construct the upstream provider from config.
///
/// Fails with [`WeatherError::MissingApiKey`] when no key is configured.
pub fn provider_from_config(
    config: &Config,
    http: &reqwest::Client,
) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let api_key = config.api_key().ok_or(WeatherError::MissingApiKey)?;

    Ok(Box::new(CwaProvider::with_client(
        http.clone(),
        config.base_url.clone(),
        api_key.to_owned(),
    )))
}

/// Build the shared HTTP client, applying the configured timeout if any.
pub fn http_client(config: &Config) -> Result<reqwest::Client, WeatherError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
