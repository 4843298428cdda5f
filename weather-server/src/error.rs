//! Mapping of failures onto JSON error responses.

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::any::Any;
use weather_core::WeatherError;

const GENERIC_FETCH_FAILURE: &str = "無法取得天氣資料，請稍後再試";

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<&'static str>>,
}

impl ErrorBody {
    fn new(error: &'static str, code: &'static str) -> Self {
        Self { error, message: None, code, details: None, missing: None }
    }

    fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug)]
pub enum ApiError {
    Weather(WeatherError),
    MissingParameters(Vec<&'static str>),
    InvalidQuery(String),
    RouteNotFound,
    Internal(String),
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        ApiError::Weather(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl ApiError {
    pub fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            ApiError::Weather(WeatherError::MissingApiKey) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("伺服器設定錯誤", "MISSING_API_KEY")
                    .message("請在 .env 檔案中設定 CWA_API_KEY"),
            ),
            ApiError::Weather(WeatherError::Upstream { status, message, details }) => {
                let mut body = ErrorBody::new("CWA API 錯誤", "UPSTREAM_ERROR")
                    .message(message.unwrap_or_else(|| "無法取得天氣資料".to_string()));
                body.details = Some(details);
                (status, body)
            }
            ApiError::Weather(WeatherError::LocationNotFound { city }) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("查無資料", "LOCATION_NOT_FOUND")
                    .message(format!("無法取得 {city} 天氣資料")),
            ),
            ApiError::Weather(WeatherError::Network(_) | WeatherError::Parse(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("伺服器錯誤", "INTERNAL_ERROR").message(GENERIC_FETCH_FAILURE),
            ),
            ApiError::MissingParameters(missing) => {
                let mut body = ErrorBody::new("缺少參數", "MISSING_PARAMETER")
                    .message(format!("請提供 {} 參數", missing.join(", ")));
                body.missing = Some(missing);
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::InvalidQuery(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("參數格式錯誤", "INVALID_QUERY").message(message),
            ),
            ApiError::RouteNotFound => {
                (StatusCode::NOT_FOUND, ErrorBody::new("找不到此路徑", "ROUTE_NOT_FOUND"))
            }
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("伺服器錯誤", "INTERNAL_ERROR").message(message),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Weather(err) = &self {
            match err {
                WeatherError::LocationNotFound { .. } => tracing::info!(error = %err, "Location not found"),
                _ => tracing::error!(error = %err, "Failed to fetch weather data"),
            }
        }

        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

/// Response for a handler that panicked, used by `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!(%message, "Handler panicked");
    ApiError::Internal(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_maps_to_500_with_fixed_code() {
        let (status, body) = ApiError::from(WeatherError::MissingApiKey).status_and_body();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "MISSING_API_KEY");
        assert_eq!(body.error, "伺服器設定錯誤");
    }

    #[test]
    fn upstream_status_is_passed_through() {
        let err = WeatherError::upstream(
            reqwest::StatusCode::FORBIDDEN,
            r#"{"message":"quota exceeded"}"#,
        );
        let (status, body) = ApiError::from(err).status_and_body();

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.message.as_deref(), Some("quota exceeded"));
        assert_eq!(body.details.unwrap()["message"], "quota exceeded");
    }

    #[test]
    fn upstream_without_message_uses_default_text() {
        let err = WeatherError::upstream(reqwest::StatusCode::BAD_GATEWAY, "<html>");
        let (status, body) = ApiError::from(err).status_and_body();

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.message.as_deref(), Some("無法取得天氣資料"));
    }

    #[test]
    fn parse_failure_is_a_generic_500() {
        let (status, body) =
            ApiError::from(WeatherError::Parse("bad".into())).status_and_body();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert_eq!(body.message.as_deref(), Some(GENERIC_FETCH_FAILURE));
    }

    #[test]
    fn missing_parameters_are_named() {
        let (status, body) =
            ApiError::MissingParameters(vec!["weather"]).status_and_body();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.message.unwrap().contains("weather"));
        assert_eq!(body.missing, Some(vec!["weather"]));
    }

    #[test]
    fn invalid_query_is_a_400_with_fixed_code() {
        let (status, body) =
            ApiError::InvalidQuery("duplicate field `city`".into()).status_and_body();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_QUERY");
        assert_eq!(body.message.as_deref(), Some("duplicate field `city`"));
    }

    #[test]
    fn panic_payload_becomes_message() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
