// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Environment-driven service configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration resolved once at process start
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Port the HTTP server binds to
    pub api_port: u16,
    /// Path to the YOLOv8 ONNX model file
    pub model_path: PathBuf,
    /// Minimum confidence score for detections to be kept
    pub confidence_threshold: f32,
    /// Per-request timeout for photo downloads
    pub fetch_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_port: 8001,
            model_path: PathBuf::from("./models/yolov8n.onnx"),
            confidence_threshold: 0.5,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults.api_port);

        let model_path = env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        let confidence_threshold = env::var("CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(defaults.confidence_threshold);

        let fetch_timeout = env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.fetch_timeout);

        Self {
            api_port,
            model_path,
            confidence_threshold,
            fetch_timeout,
        }
    }
}
