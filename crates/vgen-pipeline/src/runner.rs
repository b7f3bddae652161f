//! Generation run driver.
//!
//! Walks the packed units, generating a clip for each through the injected
//! collaborators. Units are fully independent after packing, so generation
//! runs concurrently under a semaphore; per-unit failures are recorded in
//! the report instead of aborting the run, and cached clips are reused so
//! an interrupted run resumes where it left off.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{info, warn};
use uuid::Uuid;

use vgen_models::GenerationUnit;
use vgen_segment::{plan_split, SegmentWarning};

use crate::cache::ClipCache;
use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::generate::{ClipGenerator, ClipHandle, ClipRequest, ClipTrimmer, PromptGenerator, UnitContext};

/// Outcome status for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Completed,
    Skipped,
    Failed,
}

/// Result of generating (or skipping) one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub unit_id: String,
    pub status: OutcomeStatus,
    /// Produced or cached clip, when available
    pub clip: Option<ClipHandle>,
    /// Billed cost in USD (zero for skipped and failed units)
    pub cost_usd: f64,
    /// Failure description, when status is `Failed`
    pub error: Option<String>,
}

/// Summary of a whole generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_cost_usd: f64,
    /// Per-unit outcomes, in unit order
    pub outcomes: Vec<GenerationOutcome>,
}

/// Shared collaborators for a generation run.
#[derive(Clone)]
pub struct RunContext {
    pub prompts: Arc<dyn PromptGenerator>,
    pub generator: Arc<dyn ClipGenerator>,
    pub cache: Arc<dyn ClipCache>,
    pub config: PipelineConfig,
}

/// Generate clips for all units and return the run report.
///
/// Outcomes keep unit order. Cancelling or failing one unit's generation
/// never affects its siblings: the packed units are immutable input and
/// each outcome is computed independently.
pub async fn generate_units(units: &[GenerationUnit], ctx: &RunContext) -> GenerationReport {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let semaphore = Arc::new(Semaphore::new(ctx.config.max_concurrent_generations.max(1)));

    info!(
        %run_id,
        units = units.len(),
        max_concurrent = ctx.config.max_concurrent_generations,
        "starting generation run"
    );

    let futures: Vec<_> = units
        .iter()
        .map(|unit| {
            let ctx = ctx.clone();
            let semaphore = semaphore.clone();
            async move {
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                process_unit(unit, &ctx).await
            }
        })
        .collect();

    let outcomes = join_all(futures).await;
    let finished_at = Utc::now();

    let completed = count(&outcomes, OutcomeStatus::Completed);
    let skipped = count(&outcomes, OutcomeStatus::Skipped);
    let failed = count(&outcomes, OutcomeStatus::Failed);
    let total_cost_usd = outcomes.iter().map(|o| o.cost_usd).sum();

    info!(
        %run_id,
        completed,
        skipped,
        failed,
        total_cost_usd,
        "generation run finished"
    );

    GenerationReport {
        run_id,
        started_at,
        finished_at,
        completed,
        skipped,
        failed,
        total_cost_usd,
        outcomes,
    }
}

async fn process_unit(unit: &GenerationUnit, ctx: &RunContext) -> GenerationOutcome {
    if ctx.config.skip_existing {
        if let Some(clip) = ctx.cache.get(&unit.id).await {
            info!(unit = %unit.id, location = %clip.location, "reusing cached clip");
            return GenerationOutcome {
                unit_id: unit.id.clone(),
                status: OutcomeStatus::Skipped,
                clip: Some(clip),
                cost_usd: 0.0,
                error: None,
            };
        }
    }

    let unit_ctx = UnitContext::from_unit(unit);
    let analysis = match ctx.prompts.analyze_unit(&unit_ctx).await {
        Ok(a) => a,
        Err(e) => return failure(unit, e.to_string()),
    };

    let request = ClipRequest {
        unit_id: unit.id.clone(),
        billed_duration: unit.billed_duration,
        prompt_text: bounded_prompt(analysis.prompt_text(), ctx.config.prompt_char_limit),
        reference_image: None,
    };

    let clip = match ctx.generator.generate_clip(&request).await {
        Ok(c) => c,
        Err(e) => return failure(unit, e.to_string()),
    };

    ctx.cache.put(&unit.id, clip.clone()).await;

    info!(unit = %unit.id, location = %clip.location, "generated clip");
    GenerationOutcome {
        unit_id: unit.id.clone(),
        status: OutcomeStatus::Completed,
        clip: Some(clip),
        cost_usd: unit.billed_duration * ctx.config.cost_per_second,
        error: None,
    }
}

fn failure(unit: &GenerationUnit, error: String) -> GenerationOutcome {
    warn!(unit = %unit.id, error = %error, "unit generation failed");
    GenerationOutcome {
        unit_id: unit.id.clone(),
        status: OutcomeStatus::Failed,
        clip: None,
        cost_usd: 0.0,
        error: Some(error),
    }
}

/// Truncate prompts that exceed the submission limit, on a char boundary.
fn bounded_prompt(prompt: &str, limit: usize) -> String {
    if prompt.chars().count() <= limit {
        return prompt.to_string();
    }
    warn!(
        chars = prompt.chars().count(),
        limit, "prompt too long, truncating"
    );
    let mut out: String = prompt.chars().take(limit.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Split a combined unit's produced clip back into per-member sub-clips.
///
/// Computes the offset plan (rescaling on generation-time truncation) and
/// applies it through the trimming collaborator. Returns the ordered
/// `(member_id, sub_clip)` pairs plus the mismatch warning, if any.
pub async fn split_combined(
    unit: &GenerationUnit,
    clip: &ClipHandle,
    trimmer: &dyn ClipTrimmer,
) -> PipelineResult<(Vec<(String, ClipHandle)>, Option<SegmentWarning>)> {
    let plan = plan_split(unit, clip.duration);

    let mut parts = Vec::with_capacity(plan.segments.len());
    for segment in &plan.segments {
        let sub_clip = trimmer.trim(clip, segment.start, segment.end).await?;
        parts.push((segment.member_id.clone(), sub_clip));
    }

    info!(unit = %unit.id, parts = parts.len(), "split combined clip");
    Ok((parts, plan.warning))
}

fn count(outcomes: &[GenerationOutcome], status: OutcomeStatus) -> usize {
    outcomes.iter().filter(|o| o.status == status).count()
}
