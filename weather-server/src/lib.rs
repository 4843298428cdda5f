//! HTTP proxy over the CWA open-data API.
//!
//! Exposes simplified forecasts, sunrise/sunset enrichment, a health check and
//! share-text generation as JSON endpoints.

pub mod error;
pub mod routes;

use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use weather_core::{Config, WeatherError, WeatherProvider, http_client, provider_from_config};

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, WeatherError> {
        let http = http_client(&config)?;
        Ok(Self { config: Arc::new(config), http })
    }

    /// Upstream provider for one request. Fails when no API key is configured.
    pub fn provider(&self) -> Result<Box<dyn WeatherProvider>, WeatherError> {
        provider_from_config(&self.config, &self.http)
    }
}

/// Create the HTTP router
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(routes::index))
        .route("/api/health", get(routes::health))
        .route("/api/weather/kaohsiung", get(routes::kaohsiung_weather))
        .route("/api/weather", get(routes::city_weather))
        .route("/api/share", get(routes::share));

    with_layers(router).with_state(state)
}

/// 404 fallback, panic recovery, request tracing and CORS shared by every route.
fn with_layers(router: Router<AppState>) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .fallback(routes::not_found)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve the router on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Run the HTTP server on `0.0.0.0:{config.port}` until Ctrl-C.
pub async fn run_http_server(config: Config) -> anyhow::Result<()> {
    let port = config.port;
    let environment = config.environment.clone();
    let state = AppState::new(config)?;

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, %environment, "HTTP server listening");

    serve(listener, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
        tracing::info!("Shutting down");
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn exploding_handler() -> &'static str {
        panic!("handler blew up")
    }

    #[tokio::test]
    async fn panicking_handler_returns_json_500() {
        let router = Router::new().route("/explode", get(exploding_handler));
        let app = with_layers(router).with_state(AppState::new(Config::default()).unwrap());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        let res = reqwest::get(format!("http://{addr}/explode")).await.unwrap();
        assert_eq!(res.status().as_u16(), 500);

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "handler blew up");
    }
}
