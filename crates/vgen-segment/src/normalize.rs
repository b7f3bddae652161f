//! Scene normalization.
//!
//! Cleans raw boundary pairs from the shot-change detector: drops
//! zero/negative-length pairs, enforces temporal ordering, and merges
//! scenes below the minimum viable duration into a neighbor.

use tracing::{debug, info, warn};

use vgen_models::{Scene, SegmentationConfig};

use crate::error::{SegmentError, SegmentResult};

/// Normalize raw `(start, end)` boundary pairs into a validated scene list.
///
/// Scenes shorter than `min_scene_duration` are absorbed into the following
/// scene by extending its start backward; a trailing short scene is absorbed
/// into the preceding one instead. IDs are re-derived afterwards so they
/// remain a dense 1-indexed sequence.
pub fn normalize_scenes(
    raw: &[(f64, f64)],
    config: &SegmentationConfig,
) -> SegmentResult<Vec<Scene>> {
    // Drop invalid pairs and clamp out-of-order starts so the timeline is
    // strictly ordered and non-overlapping before merging.
    let mut cleaned: Vec<(f64, f64)> = Vec::with_capacity(raw.len());
    let mut last_end = f64::NEG_INFINITY;
    for &(start, end) in raw {
        if end <= start {
            debug!(start, end, "dropping zero-length scene pair");
            continue;
        }
        let start = if start < last_end {
            warn!(start, last_end, "scene pair overlaps predecessor, clamping start");
            last_end
        } else {
            start
        };
        if end <= start {
            continue;
        }
        cleaned.push((start, end));
        last_end = end;
    }

    if cleaned.is_empty() {
        return Err(SegmentError::InvalidSceneData {
            raw_count: raw.len(),
        });
    }

    // Forward pass: a sub-floor scene donates its start to the next scene.
    // `carry` holds the start of the run being absorbed.
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(cleaned.len());
    let mut carry: Option<f64> = None;
    let last_index = cleaned.len() - 1;
    for (i, &(start, end)) in cleaned.iter().enumerate() {
        let effective_start = carry.take().unwrap_or(start);
        if end - effective_start < config.min_scene_duration && i < last_index {
            debug!(
                start = effective_start,
                end, "scene below duration floor, merging into next"
            );
            carry = Some(effective_start);
        } else {
            merged.push((effective_start, end));
        }
    }

    // A trailing sub-floor remainder merges into the preceding scene.
    if let Some(&(start, end)) = merged.last() {
        if end - start < config.min_scene_duration && merged.len() > 1 {
            let (_, short_end) = merged.pop().unwrap();
            let prev = merged.last_mut().unwrap();
            debug!(end = short_end, "trailing short scene merged into predecessor");
            prev.1 = short_end;
        }
    }

    let scenes: Vec<Scene> = merged
        .into_iter()
        .enumerate()
        .map(|(i, (start, end))| Scene::new(i as u32 + 1, start, end))
        .collect();

    info!(
        raw = raw.len(),
        normalized = scenes.len(),
        "scene normalization complete"
    );
    Ok(scenes)
}
