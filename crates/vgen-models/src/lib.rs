//! Shared data models for the Vgen pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Timeline members (scenes and chunks)
//! - Dialogue spans from the transcription engine
//! - Generation units produced by packing
//! - Scene analysis results from the prompt-generation model
//! - Segmentation configuration

pub mod analysis;
pub mod config;
pub mod dialogue;
pub mod timeline;
pub mod timestamp;
pub mod unit;

// Re-export common types
pub use analysis::{AnalysisDiagnostics, SceneAnalysis};
pub use config::SegmentationConfig;
pub use dialogue::DialogueSpan;
pub use timeline::{Chunk, Scene, TimelineMember};
pub use unit::{GenerationUnit, SplitSegment, UnitDialogue};
