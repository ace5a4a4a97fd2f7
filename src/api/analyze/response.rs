// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Photo analysis response types

use serde::{Deserialize, Serialize};

use crate::inventory::item::InventoryItem;

/// Response from photo analysis
///
/// `photos_analyzed` reports the number of photos *requested*, not the
/// number that processed successfully.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// Consolidated inventory items
    pub items: Vec<InventoryItem>,
    /// Number of photos in the request
    pub photos_analyzed: usize,
}
