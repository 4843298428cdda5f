//! Route handlers.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use weather_core::{
    ForecastFields, ShareRequest, WeatherResponse, forecast::build_response,
    sunrise::sun_times_or_unknown,
};

use crate::{AppState, error::ApiError};

/// Location queried by `/api/weather/kaohsiung`.
pub const KAOHSIUNG: &str = "高雄市";

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub data: WeatherResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub success: bool,
    pub share_content: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

/// GET / - List available endpoints
pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "歡迎使用 CWA 天氣預報 API",
        "endpoints": {
            "kaohsiung": "/api/weather/kaohsiung",
            "health": "/api/health",
            "cityWeather": "/api/weather?city=城市名稱",
            "shareWeather": "/api/share?city=城市名稱&weather=天氣描述&temperature=氣溫",
        }
    }))
}

/// GET /api/health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// GET /api/weather/kaohsiung - 36-hour forecast for Kaohsiung, with wind speed
pub async fn kaohsiung_weather(State(state): State<AppState>) -> Result<Json<DataResponse>, ApiError> {
    let provider = state.provider()?;

    let payload = provider.forecast(KAOHSIUNG).await?;
    let data = build_response(payload, KAOHSIUNG, ForecastFields::WithWind)?;

    Ok(Json(DataResponse { success: true, data }))
}

/// GET /api/weather?city= - Forecast for any city, with sunrise and sunset
pub async fn city_weather(
    State(state): State<AppState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<DataResponse>, ApiError> {
    let Query(query) = query?;
    let city = query
        .city
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| state.config.default_city.clone());

    let provider = state.provider()?;

    let payload = provider.forecast(&city).await?;
    let data = build_response(payload, &city, ForecastFields::Basic)?;

    let sun = sun_times_or_unknown(provider.as_ref(), &city).await;

    Ok(Json(DataResponse { success: true, data: data.with_sun_times(sun) }))
}

/// GET /api/share - Build a shareable sentence
pub async fn share(
    request: Result<Query<ShareRequest>, QueryRejection>,
) -> Result<Json<ShareResponse>, ApiError> {
    let Query(request) = request?;
    let share_content = request.share_text().map_err(ApiError::MissingParameters)?;

    Ok(Json(ShareResponse { success: true, share_content }))
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
