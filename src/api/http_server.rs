use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::analyze::{analyze_handler, analyze_multiple_handler};
use crate::version;
use crate::vision::detector::ObjectDetector;
use crate::vision::fetcher::PhotoFetcher;

/// Shared state handed to every request handler
///
/// The fetcher and detector are injected capabilities: constructed once
/// at process start, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PhotoFetcher>,
    pub detector: Arc<dyn ObjectDetector>,
    /// Minimum confidence score for detections to be kept
    pub confidence_threshold: f32,
}

impl AppState {
    pub fn new(
        fetcher: Arc<dyn PhotoFetcher>,
        detector: Arc<dyn ObjectDetector>,
        confidence_threshold: f32,
    ) -> Self {
        Self {
            fetcher,
            detector,
            confidence_threshold,
        }
    }
}

/// Health descriptor returned by GET /
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub service: String,
    pub version: String,
    pub model: String,
    pub status: String,
}

/// Build the service router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(health_handler))
        // Single-photo analysis
        .route("/analyze", post(analyze_handler))
        // Multi-photo analysis
        .route("/analyze-multiple", post(analyze_multiple_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until ctrl-c
pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

pub async fn health_handler(State(state): State<AppState>) -> axum::response::Json<HealthResponse> {
    axum::response::Json(HealthResponse {
        service: "Tote Vision Object Detection".to_string(),
        version: version::VERSION_NUMBER.to_string(),
        model: state.detector.model_name().to_string(),
        status: "healthy".to_string(),
    })
}
