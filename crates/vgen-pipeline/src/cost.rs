//! Flat-pricing cost estimation.
//!
//! The generation API bills every unit at the full cap regardless of
//! content length, so cost scales with unit count alone. The estimate also
//! reports what the same timeline would have cost without packing (one
//! unit per member) to make the savings visible up front.

use serde::{Deserialize, Serialize};

use vgen_models::{GenerationUnit, SegmentationConfig};

use crate::config::PipelineConfig;

/// Cost estimate for generating a packed timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Units to generate
    pub unit_count: usize,
    /// Billed seconds (unit count x unit cap)
    pub billed_seconds: f64,
    /// Actual content seconds inside the units
    pub content_seconds: f64,
    /// Estimated cost in USD at the configured per-second rate
    pub estimated_cost_usd: f64,
    /// Units that would be billed without packing (one per member)
    pub naive_unit_count: usize,
    /// Cost without packing, for comparison
    pub naive_cost_usd: f64,
}

impl CostEstimate {
    /// Savings from packing, in USD.
    pub fn savings_usd(&self) -> f64 {
        self.naive_cost_usd - self.estimated_cost_usd
    }
}

/// Estimate the cost of generating the given units.
pub fn estimate_cost(
    units: &[GenerationUnit],
    seg_config: &SegmentationConfig,
    pipe_config: &PipelineConfig,
) -> CostEstimate {
    let unit_cost = seg_config.unit_cap * pipe_config.cost_per_second;
    let unit_count = units.len();
    let naive_unit_count: usize = units.iter().map(|u| u.members.len()).sum();

    CostEstimate {
        unit_count,
        billed_seconds: unit_count as f64 * seg_config.unit_cap,
        content_seconds: units.iter().map(|u| u.content_duration()).sum(),
        estimated_cost_usd: unit_count as f64 * unit_cost,
        naive_unit_count,
        naive_cost_usd: naive_unit_count as f64 * unit_cost,
    }
}
