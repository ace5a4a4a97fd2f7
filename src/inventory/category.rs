// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Static mapping from detector class labels to inventory categories

use std::collections::HashMap;
use std::sync::OnceLock;

/// Category assigned to labels absent from the table
pub const UNCATEGORIZED: &str = "uncategorized";

/// COCO class label -> inventory category
///
/// Keys are lowercase; lookup normalizes input before matching.
const CATEGORY_TABLE: &[(&str, &str)] = &[
    // Electronics
    ("laptop", "electronics"),
    ("cell phone", "electronics"),
    ("tv", "electronics"),
    ("keyboard", "electronics"),
    ("mouse", "electronics"),
    ("remote", "electronics"),
    ("clock", "electronics"),
    // Kitchen
    ("bottle", "kitchen"),
    ("wine glass", "kitchen"),
    ("cup", "kitchen"),
    ("fork", "kitchen"),
    ("knife", "kitchen"),
    ("spoon", "kitchen"),
    ("bowl", "kitchen"),
    ("banana", "kitchen"),
    ("apple", "kitchen"),
    ("orange", "kitchen"),
    ("broccoli", "kitchen"),
    ("carrot", "kitchen"),
    ("pizza", "kitchen"),
    ("donut", "kitchen"),
    ("cake", "kitchen"),
    ("refrigerator", "kitchen"),
    ("microwave", "kitchen"),
    ("oven", "kitchen"),
    ("toaster", "kitchen"),
    // Clothing
    ("handbag", "clothing"),
    ("tie", "clothing"),
    ("suitcase", "clothing"),
    ("umbrella", "clothing"),
    ("backpack", "clothing"),
    // Sports
    ("frisbee", "sports"),
    ("skis", "sports"),
    ("snowboard", "sports"),
    ("sports ball", "sports"),
    ("kite", "sports"),
    ("baseball bat", "sports"),
    ("baseball glove", "sports"),
    ("skateboard", "sports"),
    ("surfboard", "sports"),
    ("tennis racket", "sports"),
    // Toys/Books
    ("book", "books"),
    ("teddy bear", "toys"),
    // Tools
    ("scissors", "tools"),
    ("hair drier", "tools"),
    ("toothbrush", "tools"),
    // Furniture/Decorations
    ("chair", "decorations"),
    ("couch", "decorations"),
    ("potted plant", "decorations"),
    ("bed", "decorations"),
    ("dining table", "decorations"),
    ("toilet", "decorations"),
    ("sink", "decorations"),
    ("vase", "decorations"),
];

fn category_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| CATEGORY_TABLE.iter().copied().collect())
}

/// Map a class label to its inventory category
///
/// Lookup is case-insensitive; unmapped labels fall back to
/// [`UNCATEGORIZED`].
pub fn category_for_label(label: &str) -> &'static str {
    category_map()
        .get(label.to_lowercase().as_str())
        .copied()
        .unwrap_or(UNCATEGORIZED)
}
