//! Collaborator interfaces for prompt generation, clip generation and
//! trimming.
//!
//! The core never talks to a network or a media toolchain directly; it
//! consumes these traits. Implementations live with the callers (remote
//! API clients, FFmpeg wrappers) and are injected per run.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vgen_models::{GenerationUnit, SceneAnalysis};

use crate::error::PipelineResult;

/// Handle to a generated or trimmed clip: a local path or remote URL plus
/// the clip's actual duration as reported by the producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipHandle {
    /// Path or URL of the clip
    pub location: String,
    /// Actual duration in seconds
    pub duration: f64,
}

impl ClipHandle {
    pub fn new(location: impl Into<String>, duration: f64) -> Self {
        Self {
            location: location.into(),
            duration,
        }
    }
}

/// Per-member summary handed to the prompt-generation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: String,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

/// What the prompt-generation collaborator sees for one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitContext {
    pub unit_id: String,
    pub members: Vec<MemberSummary>,
    /// Dialogue fragments in order
    pub dialogue: Vec<String>,
    pub is_combined: bool,
}

impl UnitContext {
    pub fn from_unit(unit: &GenerationUnit) -> Self {
        Self {
            unit_id: unit.id.clone(),
            members: unit
                .members
                .iter()
                .map(|m| MemberSummary {
                    id: m.id_str(),
                    start: m.start(),
                    end: m.end(),
                    duration: m.duration(),
                })
                .collect(),
            dialogue: unit.dialogue.iter().map(|d| d.text.clone()).collect(),
            is_combined: unit.is_combined,
        }
    }
}

/// Request sent to the clip-generation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRequest {
    pub unit_id: String,
    /// Billed seconds, always the unit cap
    pub billed_duration: f64,
    pub prompt_text: String,
    /// Optional reference frame for image-to-video generation
    pub reference_image: Option<String>,
}

/// Turns a unit's metadata into a natural-language generation prompt.
#[async_trait]
pub trait PromptGenerator: Send + Sync {
    async fn analyze_unit(&self, ctx: &UnitContext) -> PipelineResult<SceneAnalysis>;
}

/// Submits a prompt to the remote video-generation API and returns the
/// produced clip.
#[async_trait]
pub trait ClipGenerator: Send + Sync {
    async fn generate_clip(&self, request: &ClipRequest) -> PipelineResult<ClipHandle>;
}

/// Cuts a sub-range out of an existing clip.
#[async_trait]
pub trait ClipTrimmer: Send + Sync {
    async fn trim(&self, clip: &ClipHandle, start: f64, end: f64) -> PipelineResult<ClipHandle>;
}
