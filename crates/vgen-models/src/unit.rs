//! Generation unit models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timeline::TimelineMember;

/// A dialogue fragment assigned to a generation unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UnitDialogue {
    /// Fragment text, in timeline order
    pub text: String,

    /// Start time in seconds (absolute source timeline)
    pub start: f64,

    /// End time in seconds (absolute source timeline)
    pub end: f64,

    /// True when this fragment lies in a chunk-overlap region and is
    /// intentionally duplicated into both chunks for continuity. Callers
    /// must account for the duplication when cost-estimating or stitching.
    #[serde(default)]
    pub from_overlap: bool,
}

/// The packed bundle sent as a single request to the video-generation API.
///
/// Units are immutable once packed: the surrounding system may generate
/// clips for independent units in parallel and resume mid-pipeline without
/// recomputing packing decisions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerationUnit {
    /// Derived ID: member IDs joined with `+`
    pub id: String,

    /// Ordered member sequence (at least one, source-timeline order)
    pub members: Vec<TimelineMember>,

    /// Billed seconds for this unit. Always the unit cap regardless of
    /// content length (the generation API bills a flat rate per unit).
    pub billed_duration: f64,

    /// Dialogue fragments whose time ranges fall within the members
    pub dialogue: Vec<UnitDialogue>,

    /// True iff the unit combines more than one member
    pub is_combined: bool,
}

impl GenerationUnit {
    pub fn new(members: Vec<TimelineMember>, dialogue: Vec<UnitDialogue>, billed: f64) -> Self {
        let id = members
            .iter()
            .map(|m| m.id_str())
            .collect::<Vec<_>>()
            .join("+");
        let is_combined = members.len() > 1;
        Self {
            id,
            members,
            billed_duration: billed,
            dialogue,
            is_combined,
        }
    }

    /// Sum of member durations (the actual content length, as opposed to
    /// the billed duration).
    pub fn content_duration(&self) -> f64 {
        self.members.iter().map(|m| m.duration()).sum()
    }

    /// Dialogue fragment texts in order.
    pub fn dialogue_texts(&self) -> Vec<&str> {
        self.dialogue.iter().map(|d| d.text.as_str()).collect()
    }
}

/// One row of a unit split plan: the sub-range of the combined clip that
/// belongs to a single original member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SplitSegment {
    /// Member this sub-clip maps back to
    pub member_id: String,

    /// Start offset in seconds, relative to the combined clip
    pub start: f64,

    /// End offset in seconds, relative to the combined clip
    pub end: f64,
}

impl SplitSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
