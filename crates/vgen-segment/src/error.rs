//! Error and warning types for segmentation.
//!
//! Fatal errors abort the run; warnings accumulate and are returned
//! alongside the result so a partial-but-usable output is still produced.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for segmentation operations.
pub type SegmentResult<T> = Result<T, SegmentError>;

/// Fatal segmentation errors.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// The detector produced no usable scenes after normalization.
    #[error("no usable scenes after normalization ({raw_count} raw boundary pairs)")]
    InvalidSceneData { raw_count: usize },

    /// A computed chunk exceeds the unit cap. Unreachable given the
    /// chunking algorithm; signals a bug rather than bad input.
    #[error(
        "chunk [{chunk_start:.3}, {chunk_end:.3}) of scene {scene_id} exceeds unit cap {unit_cap}"
    )]
    ChunkOverflow {
        scene_id: u32,
        chunk_start: f64,
        chunk_end: f64,
        unit_cap: f64,
    },

    /// The configuration cannot be used by the algorithms.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Non-fatal issues collected during a segmentation run. Serializable so
/// callers can attach warnings to run reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentWarning {
    /// A dialogue span matched no timeline member and was dropped.
    OrphanDialogue { text: String, start: f64, end: f64 },

    /// A produced clip was shorter than the sum of member durations;
    /// split offsets were proportionally rescaled.
    DurationMismatch {
        unit_id: String,
        member_total: f64,
        produced: f64,
    },
}

impl std::fmt::Display for SegmentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrphanDialogue { text, start, end } => write!(
                f,
                "dialogue span \"{}\" [{:.3}, {:.3}) matched no timeline member",
                text, start, end
            ),
            Self::DurationMismatch {
                unit_id,
                member_total,
                produced,
            } => write!(
                f,
                "unit {} produced {:.3}s but members sum to {:.3}s; offsets rescaled",
                unit_id, produced, member_total
            ),
        }
    }
}
