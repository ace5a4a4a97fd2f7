// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod inventory;
pub mod version;
pub mod vision;

// Re-export main types
pub use api::{
    analyze_handler, analyze_multiple_handler, build_router, start_server, AnalysisResponse,
    AnalyzeMultipleRequest, AnalyzeRequest, ApiError, AppState, ErrorResponse, HealthResponse,
};
pub use config::ServiceConfig;
pub use inventory::{build_item, category_for_label, consolidate, ConfidenceTier, InventoryItem};
pub use vision::{
    DetectError, Detection, FetchError, HttpPhotoFetcher, ObjectDetector, PhotoFetcher,
    YoloDetector,
};
