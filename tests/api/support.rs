// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Mock capabilities shared by the endpoint tests
//!
//! Handlers depend on the fetcher/detector traits, so tests inject
//! scripted implementations instead of a live HTTP client or a loaded
//! ONNX model.

use async_trait::async_trait;
use image::DynamicImage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tote_vision_node::vision::{DetectError, Detection, FetchError, ObjectDetector, PhotoFetcher};
use tote_vision_node::AppState;

/// Build a detection with a dummy box
pub fn detection(label: &str, confidence: f32) -> Detection {
    Detection {
        label: label.to_string(),
        confidence,
        x: 0.0,
        y: 0.0,
        width: 32.0,
        height: 32.0,
    }
}

/// Fetcher that returns a blank image, failing for listed URLs
pub struct MockFetcher {
    fail_urls: Vec<String>,
}

impl MockFetcher {
    pub fn ok() -> Self {
        Self { fail_urls: vec![] }
    }

    pub fn failing_for(urls: &[&str]) -> Self {
        Self {
            fail_urls: urls.iter().map(|u| u.to_string()).collect(),
        }
    }
}

#[async_trait]
impl PhotoFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<DynamicImage, FetchError> {
        if self.fail_urls.iter().any(|u| u == url) {
            return Err(FetchError::HttpStatus(404, url.to_string()));
        }
        Ok(DynamicImage::new_rgb8(64, 64))
    }
}

/// Detector that replays scripted results, one batch per call
///
/// Once the script runs out, further calls return no detections.
pub struct ScriptedDetector {
    script: Mutex<VecDeque<Result<Vec<Detection>, DetectError>>>,
}

impl ScriptedDetector {
    pub fn returning(batches: Vec<Vec<Detection>>) -> Self {
        Self {
            script: Mutex::new(batches.into_iter().map(Ok).collect()),
        }
    }

    pub fn scripted(script: Vec<Result<Vec<Detection>, DetectError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }

    pub fn failing() -> Self {
        Self::scripted(vec![Err(DetectError::Inference(
            "inference failed".to_string(),
        ))])
    }
}

impl ObjectDetector for ScriptedDetector {
    fn detect(
        &self,
        _image: &DynamicImage,
        _confidence_threshold: f32,
    ) -> Result<Vec<Detection>, DetectError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }

    fn model_name(&self) -> &str {
        "yolov8n"
    }
}

/// Assemble an AppState around mock capabilities
pub fn test_state(fetcher: MockFetcher, detector: ScriptedDetector) -> AppState {
    AppState::new(Arc::new(fetcher), Arc::new(detector), 0.5)
}
