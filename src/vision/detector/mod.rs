// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Object detection capability
//!
//! The handlers depend on the [`ObjectDetector`] trait; the production
//! implementation is the YOLOv8 ONNX model in [`model`]. The model is
//! loaded once at process start, is read-only for the process lifetime
//! and may be shared across in-flight requests.

pub mod labels;
pub mod model;
pub mod preprocessing;

use thiserror::Error;

pub use labels::COCO_LABELS;
pub use model::YoloDetector;

/// One detected object: a labeled box with a confidence score
#[derive(Debug, Clone)]
pub struct Detection {
    /// Class label from the model vocabulary
    pub label: String,
    /// Detection confidence score (0.0-1.0)
    pub confidence: f32,
    /// X coordinate of top-left corner (original image space)
    pub x: f32,
    /// Y coordinate of top-left corner (original image space)
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

/// Detection error types
#[derive(Debug, Error)]
pub enum DetectError {
    /// Inference run failed
    #[error("Detection inference failed: {0}")]
    Inference(String),

    /// Model produced output the decoder cannot interpret
    #[error("Unexpected model output: {0}")]
    BadOutput(String),
}

/// Capability that runs object detection over an image
///
/// Implementations own their thread-safety; a loaded model accepts no
/// mutation after startup.
pub trait ObjectDetector: Send + Sync {
    /// Run detection, keeping objects at or above `confidence_threshold`
    fn detect(
        &self,
        image: &image::DynamicImage,
        confidence_threshold: f32,
    ) -> Result<Vec<Detection>, DetectError>;

    /// Name of the underlying model, reported by the health endpoint
    fn model_name(&self) -> &str;
}
