//! Result merger — deduplication and confidence filtering.
//!
//! The merge key is `(feature_id, start_line)`: two detections of the same
//! feature on the same line are one finding, whichever strategy produced
//! them. Column differences inside a line are intentionally coarse-grained
//! away.

use baseline_core::FxHashMap;

use crate::types::DetectedFeature;

/// Deduplicate raw detections and drop low-confidence survivors.
///
/// Among colliding detections the strictly higher confidence wins; ties
/// keep whichever was produced first. After deduplication, entries below
/// `confidence_floor` are dropped. Output is ordered by source position so
/// repeated runs over identical input are byte-identical.
pub fn merge_detections(
    raw: Vec<DetectedFeature>,
    confidence_floor: f32,
) -> Vec<DetectedFeature> {
    let mut index: FxHashMap<(String, u32), usize> = FxHashMap::default();
    let mut kept: Vec<DetectedFeature> = Vec::new();

    for detection in raw {
        let key = (detection.feature_id.clone(), detection.range.start_line);
        match index.get(&key) {
            Some(&slot) => {
                if detection.confidence > kept[slot].confidence {
                    kept[slot] = detection;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(detection);
            }
        }
    }

    let mut merged: Vec<DetectedFeature> = kept
        .into_iter()
        .filter(|d| d.confidence >= confidence_floor)
        .collect();

    merged.sort_by(|a, b| {
        (a.range.start_line, a.range.start_column)
            .cmp(&(b.range.start_line, b.range.start_column))
            .then_with(|| a.feature_id.cmp(&b.feature_id))
    });
    merged
}
