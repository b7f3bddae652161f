//! Generation pipeline shell.
//!
//! Drives clip generation for a packed timeline: prompt generation, clip
//! generation against the fixed-duration video API, caching for resumable
//! runs, cost estimation and combined-unit splitting. The remote API and
//! the media toolchain are reached only through the collaborator traits in
//! [`generate`], so the driver stays deterministic and testable.

pub mod cache;
pub mod config;
pub mod cost;
pub mod error;
pub mod generate;
pub mod runner;

pub use cache::{ClipCache, FsClipCache, MemoryClipCache};
pub use config::PipelineConfig;
pub use cost::{estimate_cost, CostEstimate};
pub use error::{PipelineError, PipelineResult};
pub use generate::{
    ClipGenerator, ClipHandle, ClipRequest, ClipTrimmer, MemberSummary, PromptGenerator,
    UnitContext,
};
pub use runner::{
    generate_units, split_combined, GenerationOutcome, GenerationReport, OutcomeStatus, RunContext,
};
