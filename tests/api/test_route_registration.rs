// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Router-level tests: route registration and framework-boundary
//! handling of malformed bodies

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use tote_vision_node::api::build_router;

use super::support::{detection, test_state, MockFetcher, ScriptedDetector};

#[tokio::test]
async fn test_health_route_registered() {
    let app = build_router(test_state(
        MockFetcher::ok(),
        ScriptedDetector::returning(vec![]),
    ));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = build_router(test_state(
        MockFetcher::ok(),
        ScriptedDetector::returning(vec![]),
    ));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analyze_rejects_malformed_body() {
    let app = build_router(test_state(
        MockFetcher::ok(),
        ScriptedDetector::returning(vec![]),
    ));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_analyze_route_end_to_end() {
    let app = build_router(test_state(
        MockFetcher::ok(),
        ScriptedDetector::returning(vec![vec![detection("laptop", 0.92)]]),
    ));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"photoUrl": "http://localhost:3000/uploads/test.jpg"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["photosAnalyzed"], 1);
    assert_eq!(json["items"][0]["name"], "Laptop");
    assert_eq!(json["items"][0]["category"], "electronics");
    assert_eq!(json["items"][0]["confidence"], "high");
    assert_eq!(json["items"][0]["aiGenerated"], true);
}

#[tokio::test]
async fn test_analyze_multiple_route_registered() {
    let app = build_router(test_state(
        MockFetcher::ok(),
        ScriptedDetector::returning(vec![]),
    ));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze-multiple")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"photoUrls": []}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_fetch_error_envelope() {
    let app = build_router(test_state(
        MockFetcher::failing_for(&["http://host/missing.jpg"]),
        ScriptedDetector::returning(vec![]),
    ));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"photoUrl": "http://host/missing.jpg"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["errorType"], "fetch_failed");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("Failed to download image"));
}
