//! Scene segmentation and cost-optimized clip packing.
//!
//! Takes raw scene boundaries from a shot-change detector plus word-level
//! dialogue spans from a speech-to-text engine and produces an ordered
//! list of generation units for a fixed-duration video-generation API,
//! minimizing the number of billed units.
//!
//! The five stages are pure, single-threaded, deterministic
//! transformations over in-memory timelines:
//!
//! 1. [`normalize::normalize_scenes`] — validate and clean raw boundaries
//! 2. [`chunk::chunk_scenes`] — split oversized scenes into overlapping chunks
//! 3. [`dialogue::allocate_dialogue`] — map transcript spans onto the timeline
//! 4. [`pack::pack_units`] — greedily group members into billed units
//! 5. [`split::plan_split`] — map a produced clip back to per-member segments
//!
//! [`segment_timeline`] runs stages 1-4 end to end. Stage 5 runs after
//! generation, against each produced clip.

pub mod chunk;
pub mod dialogue;
pub mod error;
pub mod normalize;
pub mod pack;
pub mod split;

pub use chunk::chunk_scenes;
pub use dialogue::allocate_dialogue;
pub use error::{SegmentError, SegmentResult, SegmentWarning};
pub use normalize::normalize_scenes;
pub use pack::pack_units;
pub use split::{plan_split, SplitPlan};

use tracing::info;
use vgen_models::{DialogueSpan, GenerationUnit, SegmentationConfig};

/// Result of a full segmentation run.
///
/// Units are immutable once computed: the caller may cache them and resume
/// generation mid-pipeline without re-running segmentation.
#[derive(Debug, Clone)]
pub struct SegmentationOutput {
    /// Ordered generation units
    pub units: Vec<GenerationUnit>,
    /// Non-fatal issues encountered along the way
    pub warnings: Vec<SegmentWarning>,
}

impl SegmentationOutput {
    /// Total seconds the generation API will bill for these units.
    pub fn billed_seconds(&self, config: &SegmentationConfig) -> f64 {
        self.units.len() as f64 * config.unit_cap
    }
}

/// Run normalization, chunking, dialogue allocation and packing.
///
/// Fatal errors ([`SegmentError`]) abort the run; recoverable issues are
/// collected into [`SegmentationOutput::warnings`] so a partial-but-usable
/// result is still produced.
pub fn segment_timeline(
    raw_scenes: &[(f64, f64)],
    dialogue: &[DialogueSpan],
    config: &SegmentationConfig,
) -> SegmentResult<SegmentationOutput> {
    config
        .validate()
        .map_err(SegmentError::InvalidConfig)?;

    let scenes = normalize_scenes(raw_scenes, config)?;
    let members = chunk_scenes(scenes, config)?;
    let (member_dialogue, warnings) = allocate_dialogue(&members, dialogue);
    let units = pack_units(members, member_dialogue, config);

    info!(
        units = units.len(),
        warnings = warnings.len(),
        "segmentation complete"
    );
    Ok(SegmentationOutput { units, warnings })
}
