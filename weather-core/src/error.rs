use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while talking to the CWA open-data API and reshaping its payloads.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No `CWA_API_KEY` is configured, so no upstream call can be authorized.
    #[error("CWA API key is not configured")]
    MissingApiKey,

    /// The upstream answered with a non-success status.
    #[error(
        "CWA API request failed with status {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Upstream {
        status: StatusCode,
        /// The upstream `message` field, when the body carried one.
        message: Option<String>,
        /// Upstream body, as JSON when it parsed, otherwise as a JSON string.
        details: serde_json::Value,
    },

    /// The upstream returned no location record for the requested city.
    #[error("no forecast data for location '{city}'")]
    LocationNotFound { city: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to parse CWA response: {0}")]
    Parse(String),
}

impl WeatherError {
    /// Build an [`WeatherError::Upstream`] from a failed response body.
    pub fn upstream(status: StatusCode, body: &str) -> Self {
        let details = serde_json::from_str::<serde_json::Value>(body)
            .unwrap_or_else(|_| serde_json::Value::String(truncate_body(body)));

        let message = details
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_owned);

        WeatherError::Upstream { status, message, details }
    }
}

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
