// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YOLOv8 object detection model
//!
//! Loads a pretrained YOLOv8 ONNX export and decodes its output into
//! labeled boxes. Runs on CPU only.

use anyhow::{Context, Result};
use image::DynamicImage;
use ndarray::{ArrayViewD, IxDyn};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::labels::label_for_class;
use super::preprocessing::{preprocess_for_detection, PreprocessInfo, DETECT_INPUT_SIZE};
use super::{DetectError, Detection, ObjectDetector};

/// IoU threshold for non-maximum suppression
pub const NMS_IOU_THRESHOLD: f32 = 0.45;

/// A thresholded detection candidate in letterbox space
#[derive(Debug, Clone)]
struct Candidate {
    class: usize,
    score: f32,
    /// x, y, width, height of the top-left anchored box
    bbox: [f32; 4],
}

/// YOLOv8 detection model
///
/// Holds the ONNX Runtime session behind a mutex; the session itself is
/// the only shared state and is never reconfigured after loading.
pub struct YoloDetector {
    session: Arc<Mutex<Session>>,
    input_name: String,
    model_name: String,
}

impl std::fmt::Debug for YoloDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoloDetector")
            .field("input_name", &self.input_name)
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

impl YoloDetector {
    /// Load the detection model from an ONNX file
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - ONNX Runtime initialization fails
    pub async fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Detection model not found: {}", model_path.display());
        }

        info!("Loading detection model from {}", model_path.display());

        // CPU-only execution
        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load detection model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "images".to_string());

        if let Some(output) = session.outputs.first() {
            debug!("Detection model output: {}", output.name);
        }

        let model_name = model_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("yolov8n")
            .to_string();

        info!("Detection model '{}' loaded (CPU-only)", model_name);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            model_name,
        })
    }

    /// Decode the YOLOv8 output tensor into detections
    ///
    /// The model emits `[1, 4 + num_classes, N]`: four box attributes
    /// (center x, center y, width, height) followed by per-class scores
    /// for each of N anchors.
    fn parse_output(
        &self,
        output: ArrayViewD<f32>,
        info: &PreprocessInfo,
        confidence_threshold: f32,
    ) -> Result<Vec<Detection>, DetectError> {
        let shape = output.shape();
        if shape.len() != 3 || shape[0] != 1 || shape[1] <= 4 {
            return Err(DetectError::BadOutput(format!(
                "expected [1, 4 + classes, anchors] tensor, got {:?}",
                shape
            )));
        }

        let num_classes = shape[1] - 4;
        let anchors = shape[2];

        let mut candidates = Vec::new();
        for anchor in 0..anchors {
            let mut best_class = 0;
            let mut best_score = 0.0f32;
            for class in 0..num_classes {
                let score = output[IxDyn(&[0, 4 + class, anchor])];
                if score > best_score {
                    best_score = score;
                    best_class = class;
                }
            }

            if best_score < confidence_threshold {
                continue;
            }

            let cx = output[IxDyn(&[0, 0, anchor])];
            let cy = output[IxDyn(&[0, 1, anchor])];
            let w = output[IxDyn(&[0, 2, anchor])];
            let h = output[IxDyn(&[0, 3, anchor])];

            candidates.push(Candidate {
                class: best_class,
                score: best_score,
                bbox: [cx - w / 2.0, cy - h / 2.0, w, h],
            });
        }

        let kept = non_max_suppression(candidates, NMS_IOU_THRESHOLD);
        debug!("{} detections after NMS", kept.len());

        Ok(kept
            .into_iter()
            .map(|candidate| self.to_detection(candidate, info))
            .collect())
    }

    /// Map a kept candidate from letterbox space to original image space
    fn to_detection(&self, candidate: Candidate, info: &PreprocessInfo) -> Detection {
        let [bx, by, bw, bh] = candidate.bbox;
        let (x1, y1) = info.map_to_original(bx, by);
        let (x2, y2) = info.map_to_original(bx + bw, by + bh);

        let max_w = info.original_width as f32;
        let max_h = info.original_height as f32;
        let x1 = x1.clamp(0.0, max_w);
        let y1 = y1.clamp(0.0, max_h);
        let x2 = x2.clamp(0.0, max_w);
        let y2 = y2.clamp(0.0, max_h);

        Detection {
            label: label_for_class(candidate.class).to_string(),
            confidence: candidate.score,
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }
}

impl ObjectDetector for YoloDetector {
    fn detect(
        &self,
        image: &DynamicImage,
        confidence_threshold: f32,
    ) -> Result<Vec<Detection>, DetectError> {
        let tensor = preprocess_for_detection(image);
        let info = PreprocessInfo::new(image, DETECT_INPUT_SIZE);

        let mut session = self.session.lock().unwrap();

        let input_value = Value::from_array(tensor)
            .map_err(|e| DetectError::Inference(format!("Failed to create input tensor: {}", e)))?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .map_err(|e| DetectError::Inference(e.to_string()))?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| DetectError::BadOutput(e.to_string()))?;

        let detections = self.parse_output(output_tensor.view(), &info, confidence_threshold)?;

        debug!("Detected {} objects", detections.len());

        Ok(detections)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Intersection-over-union of two top-left anchored boxes
fn iou(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    let ax2 = a[0] + a[2];
    let ay2 = a[1] + a[3];
    let bx2 = b[0] + b[2];
    let by2 = b[1] + b[3];

    let inter_w = (ax2.min(bx2) - a[0].max(b[0])).max(0.0);
    let inter_h = (ay2.min(by2) - a[1].max(b[1])).max(0.0);
    let intersection = inter_w * inter_h;

    let union = a[2] * a[3] + b[2] * b[3] - intersection;
    if union <= 0.0 {
        return 0.0;
    }

    intersection / union
}

/// Greedy class-wise non-maximum suppression
///
/// Keeps the highest-scoring box of each overlapping same-class group.
fn non_max_suppression(mut candidates: Vec<Candidate>, iou_threshold: f32) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let suppressed = kept.iter().any(|k| {
            k.class == candidate.class && iou(&k.bbox, &candidate.bbox) > iou_threshold
        });
        if !suppressed {
            kept.push(candidate);
        }
    }

    kept
}
