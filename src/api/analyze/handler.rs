// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Photo analysis endpoint handlers

use axum::{extract::State, Json};
use tracing::{debug, info, warn};

use super::request::{AnalyzeMultipleRequest, AnalyzeRequest};
use super::response::AnalysisResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::inventory::consolidate::consolidate;
use crate::inventory::item::{build_item, InventoryItem};

/// POST /analyze - Analyze a single photo and return detected items
///
/// Downloads the photo, runs detection, builds one item per detection
/// and consolidates duplicates.
///
/// # Errors
/// - 400 Bad Request: invalid request, or photo download/decode failed
/// - 500 Internal Server Error: detection failed
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    debug!("Analyzing photo: {}", request.photo_url);

    // 1. Validate request
    request.validate()?;

    // 2. Download and decode the photo
    let image = state.fetcher.fetch(&request.photo_url).await.map_err(|e| {
        warn!("Failed to fetch {}: {}", request.photo_url, e);
        ApiError::FetchFailed(e.to_string())
    })?;

    // 3. Detect objects
    let detections = state
        .detector
        .detect(&image, state.confidence_threshold)
        .map_err(|e| {
            warn!("Detection failed for {}: {}", request.photo_url, e);
            ApiError::DetectionFailed(e.to_string())
        })?;

    info!(
        "Detected {} objects in {}",
        detections.len(),
        request.photo_url
    );

    // 4. Build items and consolidate duplicates
    let items: Vec<InventoryItem> = detections
        .iter()
        .map(|detection| build_item(detection, &request.photo_url))
        .collect();
    let items = consolidate(items);

    Ok(Json(AnalysisResponse {
        items,
        photos_analyzed: 1,
    }))
}

/// POST /analyze-multiple - Analyze a set of photos and return
/// consolidated items
///
/// Photos are processed sequentially and independently: a photo that
/// fails to download or detect is logged and skipped, never failing the
/// request. `photosAnalyzed` reports the number of URLs requested,
/// regardless of how many succeeded.
///
/// # Errors
/// - 400 Bad Request: malformed request body
pub async fn analyze_multiple_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeMultipleRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    debug!("Analyzing {} photos", request.photo_urls.len());

    // 1. Validate request
    request.validate()?;

    // 2. Fetch + detect + build per photo, skipping failures
    let mut all_items: Vec<InventoryItem> = Vec::new();
    for photo_url in &request.photo_urls {
        let image = match state.fetcher.fetch(photo_url).await {
            Ok(image) => image,
            Err(e) => {
                warn!("Failed to analyze {}: {}", photo_url, e);
                continue;
            }
        };

        let detections = match state.detector.detect(&image, state.confidence_threshold) {
            Ok(detections) => detections,
            Err(e) => {
                warn!("Failed to analyze {}: {}", photo_url, e);
                continue;
            }
        };

        all_items.extend(
            detections
                .iter()
                .map(|detection| build_item(detection, photo_url)),
        );
    }

    // 3. Consolidate the pooled items once
    let items = consolidate(all_items);

    info!(
        "Consolidated {} items from {} photos",
        items.len(),
        request.photo_urls.len()
    );

    Ok(Json(AnalysisResponse {
        items,
        photos_analyzed: request.photo_urls.len(),
    }))
}
