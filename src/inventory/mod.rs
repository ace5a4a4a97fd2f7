// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Inventory item construction and consolidation
//!
//! Converts raw detections into structured inventory items, maps model
//! labels onto inventory categories, and merges duplicate items across
//! one or more photos.

pub mod category;
pub mod consolidate;
pub mod item;

pub use category::{category_for_label, UNCATEGORIZED};
pub use consolidate::consolidate;
pub use item::{build_item, ConfidenceTier, InventoryItem};
