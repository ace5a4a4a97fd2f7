// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Duplicate-item consolidation across one or more photos

use std::collections::HashMap;

use crate::inventory::item::InventoryItem;

/// Merge items that represent the same detected object
///
/// Items sharing a `(lowercase name, category)` key are folded into the
/// first occurrence: its quantity is incremented once per duplicate
/// (occurrence counting, independent of the duplicate's own quantity
/// field) and its confidence tier is raised when a duplicate ranks
/// strictly higher. Every other field keeps the first occurrence's
/// value, including `source_photo`. Output preserves the order in which
/// keys were first seen.
pub fn consolidate(items: Vec<InventoryItem>) -> Vec<InventoryItem> {
    let mut merged: Vec<InventoryItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key = format!("{}-{}", item.name.to_lowercase(), item.category);
        match index.get(&key) {
            Some(&i) => {
                let representative = &mut merged[i];
                representative.quantity += 1;
                if item.confidence > representative.confidence {
                    representative.confidence = item.confidence;
                }
            }
            None => {
                index.insert(key, merged.len());
                merged.push(item);
            }
        }
    }

    merged
}
