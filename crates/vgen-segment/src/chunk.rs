//! Scene chunking.
//!
//! Splits any scene whose duration exceeds the unit cap into overlapping
//! sub-chunks that each fit the cap. The overlap between consecutive
//! chunks is retained deliberately so stitched output keeps visual
//! continuity across chunk boundaries.

use tracing::{debug, info};

use vgen_models::{Chunk, SegmentationConfig, TimelineMember};

use crate::error::{SegmentError, SegmentResult};

const EPS: f64 = 1e-9;

/// Replace oversized scenes with ordered chunk lists; scenes that fit the
/// cap pass through unchanged.
pub fn chunk_scenes(
    scenes: Vec<vgen_models::Scene>,
    config: &SegmentationConfig,
) -> SegmentResult<Vec<TimelineMember>> {
    let mut members = Vec::with_capacity(scenes.len());
    let mut chunked_scenes = 0usize;

    for scene in scenes {
        if scene.duration() <= config.unit_cap + EPS {
            members.push(TimelineMember::Scene(scene));
            continue;
        }

        let chunks = split_scene(&scene, config)?;
        debug!(
            scene = %scene.id_str(),
            duration = scene.duration(),
            chunks = chunks.len(),
            "split oversized scene"
        );
        chunked_scenes += 1;
        members.extend(chunks.into_iter().map(TimelineMember::Chunk));
    }

    if chunked_scenes > 0 {
        info!(chunked_scenes, total_members = members.len(), "chunking complete");
    }
    Ok(members)
}

/// Split one oversized scene into overlapping chunks.
///
/// The first chunk takes a full unit cap; every following chunk starts
/// `chunk_overlap` before its predecessor's end and spans `chunk_target`
/// seconds, with the final chunk clamped to the scene's true end. The
/// union of the chunks' non-overlap regions reconstructs the scene
/// exactly.
fn split_scene(scene: &vgen_models::Scene, config: &SegmentationConfig) -> SegmentResult<Vec<Chunk>> {
    let mut bounds: Vec<(f64, f64)> = Vec::new();
    let first_end = (scene.start + config.unit_cap).min(scene.end);
    bounds.push((scene.start, first_end));

    while bounds.last().unwrap().1 < scene.end - EPS {
        let prev_end = bounds.last().unwrap().1;
        let start = prev_end - config.chunk_overlap;
        let end = (start + config.chunk_target).min(scene.end);
        bounds.push((start, end));
    }

    let total = bounds.len() as u32;
    let mut chunks = Vec::with_capacity(bounds.len());
    for (i, &(start, end)) in bounds.iter().enumerate() {
        if end - start > config.unit_cap + EPS {
            return Err(SegmentError::ChunkOverflow {
                scene_id: scene.id,
                chunk_start: start,
                chunk_end: end,
                unit_cap: config.unit_cap,
            });
        }
        let overlap_with_prev = if i == 0 {
            0.0
        } else {
            bounds[i - 1].1 - start
        };
        let overlap_with_next = if i + 1 < bounds.len() {
            end - bounds[i + 1].0
        } else {
            0.0
        };
        chunks.push(Chunk {
            parent_id: scene.id,
            index: i as u32 + 1,
            total,
            start,
            end,
            overlap_with_prev,
            overlap_with_next,
        });
    }

    Ok(chunks)
}
