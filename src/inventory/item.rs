// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Inventory item types and construction from detections

use serde::{Deserialize, Serialize};

use crate::inventory::category::category_for_label;
use crate::vision::detector::Detection;

/// Scores at or above this are high confidence
pub const HIGH_CONFIDENCE_THRESHOLD: f32 = 0.8;

/// Scores at or above this (and below high) are medium confidence
pub const MEDIUM_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// The model cannot assess condition; every item gets this placeholder
pub const DEFAULT_CONDITION: &str = "good";

/// Three-level bucketing of a raw [0,1] confidence score
///
/// Ordered low < medium < high so that consolidation can keep the
/// highest tier seen across merged detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Bucket a raw confidence score into a tier
    pub fn from_score(score: f32) -> Self {
        if score >= HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceTier::High
        } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

/// A structured inventory item built from one detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Display name (title-cased class label)
    pub name: String,
    /// Templated description embedding the confidence percentage
    pub description: String,
    /// Inventory category from the static label table
    pub category: String,
    /// Number of occurrences; 1 until consolidation merges duplicates
    pub quantity: u32,
    /// Placeholder condition (see [`DEFAULT_CONDITION`])
    pub condition: String,
    /// Confidence tier, serialized as "low" | "medium" | "high"
    pub confidence: ConfidenceTier,
    /// Always true: these items come from model inference
    pub ai_generated: bool,
    /// URL of the photo the detection came from
    pub source_photo: String,
}

/// Build an inventory item from a single detection
///
/// Pure and total: any well-formed detection yields an item.
pub fn build_item(detection: &Detection, source_photo: &str) -> InventoryItem {
    InventoryItem {
        name: title_case(&detection.label),
        description: format!(
            "Detected with {:.0}% confidence",
            detection.confidence * 100.0
        ),
        category: category_for_label(&detection.label).to_string(),
        quantity: 1,
        condition: DEFAULT_CONDITION.to_string(),
        confidence: ConfidenceTier::from_score(detection.confidence),
        ai_generated: true,
        source_photo: source_photo.to_string(),
    }
}

/// Capitalize the first letter of each whitespace-separated word
fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
