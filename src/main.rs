// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use std::{env, sync::Arc};
use tote_vision_node::{
    api::{start_server, AppState},
    config::ServiceConfig,
    version,
    vision::{HttpPhotoFetcher, YoloDetector},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("Starting {}", version::get_version_string());

    let config = ServiceConfig::from_env();
    info!(
        "Configuration: port={}, model={}, confidence_threshold={}",
        config.api_port,
        config.model_path.display(),
        config.confidence_threshold
    );

    // Load the detection model once, before serving
    let detector = YoloDetector::load(&config.model_path)
        .await
        .context("Failed to load detection model")?;

    let fetcher = HttpPhotoFetcher::new(config.fetch_timeout);

    let state = AppState::new(
        Arc::new(fetcher),
        Arc::new(detector),
        config.confidence_threshold,
    );

    start_server(state, config.api_port)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
