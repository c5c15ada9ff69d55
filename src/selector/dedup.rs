//! Collapsing video formats to one per (height, container)

use crate::extractor::models::Format;
use std::collections::HashMap;

/// Keep one format per `(height, ext)` key.
///
/// The last format seen for a key wins; keys keep the position of their first
/// appearance. Callers that want a particular winner must order the input first.
pub fn dedup_by_height_and_container(formats: Vec<Format>) -> Vec<Format> {
    let mut slots: HashMap<(Option<u32>, String), usize> = HashMap::new();
    let mut unique: Vec<Format> = Vec::with_capacity(formats.len());

    for format in formats {
        let key = (format.height, format.ext.clone());
        match slots.get(&key) {
            Some(&slot) => unique[slot] = format,
            None => {
                slots.insert(key, unique.len());
                unique.push(format);
            }
        }
    }

    unique
}
