// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Endpoint tests for POST /analyze
//!
//! The handler is called directly with injected mock capabilities:
//! - fetch failure aborts with 400, detect failure with 500
//! - one item per detection, duplicates consolidated
//! - photosAnalyzed is always 1

use axum::{extract::State, Json};

use tote_vision_node::api::analyze::{analyze_handler, AnalyzeRequest};
use tote_vision_node::ConfidenceTier;

use super::support::{detection, test_state, MockFetcher, ScriptedDetector};

const PHOTO_URL: &str = "http://localhost:3000/uploads/test.jpg";

fn request(url: &str) -> Json<AnalyzeRequest> {
    Json(AnalyzeRequest {
        photo_url: url.to_string(),
    })
}

#[tokio::test]
async fn test_analyze_photo_success() {
    let state = test_state(
        MockFetcher::ok(),
        ScriptedDetector::returning(vec![vec![
            detection("laptop", 0.92),
            detection("mouse", 0.85),
        ]]),
    );

    let result = analyze_handler(State(state), request(PHOTO_URL)).await;
    let response = result.expect("analysis should succeed").0;

    assert_eq!(response.photos_analyzed, 1);
    assert_eq!(response.items.len(), 2);

    let laptop = &response.items[0];
    assert_eq!(laptop.name, "Laptop");
    assert_eq!(laptop.category, "electronics");
    assert_eq!(laptop.confidence, ConfidenceTier::High);
    assert_eq!(laptop.quantity, 1);
    assert!(laptop.ai_generated);
    assert_eq!(laptop.source_photo, PHOTO_URL);

    let mouse = &response.items[1];
    assert_eq!(mouse.name, "Mouse");
    assert_eq!(mouse.category, "electronics");
}

#[tokio::test]
async fn test_analyze_photo_no_detections() {
    let state = test_state(MockFetcher::ok(), ScriptedDetector::returning(vec![vec![]]));

    let result = analyze_handler(State(state), request(PHOTO_URL)).await;
    let response = result.expect("analysis should succeed").0;

    assert_eq!(response.photos_analyzed, 1);
    assert!(response.items.is_empty());
}

#[tokio::test]
async fn test_analyze_photo_download_failure() {
    let state = test_state(
        MockFetcher::failing_for(&[PHOTO_URL]),
        ScriptedDetector::returning(vec![]),
    );

    let result = analyze_handler(State(state), request(PHOTO_URL)).await;

    let err = result.expect_err("fetch failure should abort the request");
    assert_eq!(err.status_code(), 400);
    assert!(err.to_string().contains("Failed to download image"));
}

#[tokio::test]
async fn test_analyze_photo_detection_failure() {
    let state = test_state(MockFetcher::ok(), ScriptedDetector::failing());

    let result = analyze_handler(State(state), request(PHOTO_URL)).await;

    let err = result.expect_err("detect failure should abort the request");
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_analyze_photo_missing_url() {
    let state = test_state(MockFetcher::ok(), ScriptedDetector::returning(vec![]));

    let result = analyze_handler(State(state), request("")).await;

    let err = result.expect_err("empty photoUrl should fail validation");
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_analyze_photo_malformed_url() {
    let state = test_state(MockFetcher::ok(), ScriptedDetector::returning(vec![]));

    let result = analyze_handler(State(state), request("not a url")).await;

    let err = result.expect_err("malformed photoUrl should fail validation");
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_analyze_photo_consolidates_duplicates() {
    let state = test_state(
        MockFetcher::ok(),
        ScriptedDetector::returning(vec![vec![
            detection("laptop", 0.6),
            detection("laptop", 0.92),
            detection("cup", 0.7),
        ]]),
    );

    let result = analyze_handler(State(state), request(PHOTO_URL)).await;
    let response = result.expect("analysis should succeed").0;

    assert_eq!(response.items.len(), 2);

    let laptop = &response.items[0];
    assert_eq!(laptop.name, "Laptop");
    assert_eq!(laptop.quantity, 2);
    // Merging keeps the highest tier observed
    assert_eq!(laptop.confidence, ConfidenceTier::High);

    let cup = &response.items[1];
    assert_eq!(cup.name, "Cup");
    assert_eq!(cup.category, "kitchen");
    assert_eq!(cup.confidence, ConfidenceTier::Medium);
}

#[tokio::test]
async fn test_analyze_photo_confidence_tiers() {
    let state = test_state(
        MockFetcher::ok(),
        ScriptedDetector::returning(vec![vec![
            detection("laptop", 0.95),
            detection("cup", 0.65),
            detection("book", 0.45),
        ]]),
    );

    let result = analyze_handler(State(state), request(PHOTO_URL)).await;
    let response = result.expect("analysis should succeed").0;

    assert_eq!(response.items[0].confidence, ConfidenceTier::High);
    assert_eq!(response.items[1].confidence, ConfidenceTier::Medium);
    assert_eq!(response.items[2].confidence, ConfidenceTier::Low);
}
