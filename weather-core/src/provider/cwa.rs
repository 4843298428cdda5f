use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    WeatherError,
    model::{ForecastPayload, SunPayload},
    provider::DatasetId,
};

use super::WeatherProvider;

/// Client for the CWA open-data REST datastore.
#[derive(Debug, Clone)]
pub struct CwaProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl CwaProvider {
    #[cfg(test)]
    fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(
        http: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key: api_key.into(), base_url, http }
    }

    fn dataset_url(&self, dataset: DatasetId) -> String {
        format!("{}/v1/rest/datastore/{}", self.base_url, dataset.as_str())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        dataset: DatasetId,
        location: &str,
    ) -> Result<T, WeatherError> {
        let res = self
            .http
            .get(self.dataset_url(dataset))
            .query(&[
                ("Authorization", self.api_key.as_str()),
                (dataset.location_param(), location),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%dataset, %status, "CWA request rejected");
            return Err(WeatherError::upstream(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("{dataset} response: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for CwaProvider {
    async fn forecast(&self, location: &str) -> Result<ForecastPayload, WeatherError> {
        self.fetch(DatasetId::Forecast36h, location).await
    }

    async fn sun_times(&self, county: &str) -> Result<SunPayload, WeatherError> {
        self.fetch(DatasetId::SunriseSunset, county).await
    }
}
