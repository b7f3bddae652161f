//! End-to-end pipeline tests with stub collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use vgen_models::{GenerationUnit, Scene, SceneAnalysis, TimelineMember};
use vgen_pipeline::{
    generate_units, split_combined, ClipCache, ClipGenerator, ClipHandle, ClipRequest,
    ClipTrimmer, MemoryClipCache, OutcomeStatus, PipelineConfig, PipelineError, PipelineResult,
    PromptGenerator, RunContext, UnitContext,
};
use vgen_segment::SegmentWarning;

struct StubPrompts {
    prompt: String,
}

impl StubPrompts {
    fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

#[async_trait]
impl PromptGenerator for StubPrompts {
    async fn analyze_unit(&self, _ctx: &UnitContext) -> PipelineResult<SceneAnalysis> {
        Ok(SceneAnalysis::Unparsed {
            raw_text: self.prompt.clone(),
        })
    }
}

struct StubGenerator {
    calls: AtomicUsize,
    requests: Mutex<Vec<ClipRequest>>,
    /// Unit IDs whose generation should fail
    fail_units: Vec<String>,
}

impl StubGenerator {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            fail_units: Vec::new(),
        }
    }

    fn failing_for(unit_id: &str) -> Self {
        Self {
            fail_units: vec![unit_id.to_string()],
            ..Self::new()
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClipGenerator for StubGenerator {
    async fn generate_clip(&self, request: &ClipRequest) -> PipelineResult<ClipHandle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if self.fail_units.contains(&request.unit_id) {
            return Err(PipelineError::generation_failed("api returned 500"));
        }
        Ok(ClipHandle::new(
            format!("clips/{}.mp4", request.unit_id),
            request.billed_duration,
        ))
    }
}

struct StubTrimmer;

#[async_trait]
impl ClipTrimmer for StubTrimmer {
    async fn trim(&self, clip: &ClipHandle, start: f64, end: f64) -> PipelineResult<ClipHandle> {
        Ok(ClipHandle::new(
            format!("{}#{start:.3}-{end:.3}", clip.location),
            end - start,
        ))
    }
}

fn single_scene_unit(id: u32, start: f64, end: f64) -> GenerationUnit {
    GenerationUnit::new(
        vec![TimelineMember::Scene(Scene::new(id, start, end))],
        Vec::new(),
        8.0,
    )
}

fn run_context(
    prompts: Arc<dyn PromptGenerator>,
    generator: Arc<dyn ClipGenerator>,
    cache: Arc<dyn ClipCache>,
) -> RunContext {
    RunContext {
        prompts,
        generator,
        cache,
        config: PipelineConfig::default(),
    }
}

#[tokio::test]
async fn test_run_generates_all_units() {
    let units = vec![single_scene_unit(1, 0.0, 5.0), single_scene_unit(2, 5.0, 11.0)];
    let generator = Arc::new(StubGenerator::new());
    let cache = Arc::new(MemoryClipCache::new());
    let ctx = run_context(
        Arc::new(StubPrompts::new("a prompt")),
        generator.clone(),
        cache.clone(),
    );

    let report = generate_units(&units, &ctx).await;

    assert_eq!(report.completed, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(generator.call_count(), 2);
    // Flat pricing: two units at the full cap.
    assert!((report.total_cost_usd - 1.60).abs() < 1e-9);

    // Outcomes keep unit order and carry the produced clips.
    assert_eq!(report.outcomes[0].unit_id, "scene_01");
    assert_eq!(report.outcomes[1].unit_id, "scene_02");
    assert_eq!(
        report.outcomes[0].clip.as_ref().unwrap().location,
        "clips/scene_01.mp4"
    );

    // Both clips landed in the cache for later resume.
    assert_eq!(cache.len().await, 2);
}

#[tokio::test]
async fn test_cached_units_are_skipped() {
    let units = vec![single_scene_unit(1, 0.0, 5.0), single_scene_unit(2, 5.0, 11.0)];
    let generator = Arc::new(StubGenerator::new());
    let cache = Arc::new(MemoryClipCache::new());
    cache
        .put("scene_01", ClipHandle::new("clips/scene_01.mp4", 8.0))
        .await;
    let ctx = run_context(
        Arc::new(StubPrompts::new("a prompt")),
        generator.clone(),
        cache,
    );

    let report = generate_units(&units, &ctx).await;

    assert_eq!(report.completed, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(generator.call_count(), 1);

    let skipped = &report.outcomes[0];
    assert_eq!(skipped.status, OutcomeStatus::Skipped);
    assert_eq!(skipped.cost_usd, 0.0);
    assert!(skipped.clip.is_some());
}

#[tokio::test]
async fn test_skip_existing_disabled_regenerates() {
    let units = vec![single_scene_unit(1, 0.0, 5.0)];
    let generator = Arc::new(StubGenerator::new());
    let cache = Arc::new(MemoryClipCache::new());
    cache
        .put("scene_01", ClipHandle::new("clips/stale.mp4", 8.0))
        .await;

    let mut ctx = run_context(
        Arc::new(StubPrompts::new("a prompt")),
        generator.clone(),
        cache,
    );
    ctx.config.skip_existing = false;

    let report = generate_units(&units, &ctx).await;

    assert_eq!(report.completed, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn test_failed_unit_does_not_abort_run() {
    let units = vec![single_scene_unit(1, 0.0, 5.0), single_scene_unit(2, 5.0, 11.0)];
    let generator = Arc::new(StubGenerator::failing_for("scene_01"));
    let cache = Arc::new(MemoryClipCache::new());
    let ctx = run_context(
        Arc::new(StubPrompts::new("a prompt")),
        generator,
        cache.clone(),
    );

    let report = generate_units(&units, &ctx).await;

    assert_eq!(report.completed, 1);
    assert_eq!(report.failed, 1);

    let failed = &report.outcomes[0];
    assert_eq!(failed.status, OutcomeStatus::Failed);
    assert_eq!(failed.cost_usd, 0.0);
    assert!(failed.clip.is_none());
    assert!(failed.error.as_deref().unwrap().contains("api returned 500"));

    // Failed unit billed nothing; the sibling still completed and cached.
    assert!((report.total_cost_usd - 0.80).abs() < 1e-9);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_long_prompts_are_truncated() {
    let units = vec![single_scene_unit(1, 0.0, 5.0)];
    let long_prompt: String = "word ".repeat(400);
    let generator = Arc::new(StubGenerator::new());
    let ctx = run_context(
        Arc::new(StubPrompts::new(long_prompt)),
        generator.clone(),
        Arc::new(MemoryClipCache::new()),
    );

    generate_units(&units, &ctx).await;

    let requests = generator.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].prompt_text.chars().count(), 1000);
    assert!(requests[0].prompt_text.ends_with("..."));
}

#[tokio::test]
async fn test_split_combined_trims_each_member() {
    let unit = GenerationUnit::new(
        vec![
            TimelineMember::Scene(Scene::new(1, 0.0, 2.0)),
            TimelineMember::Scene(Scene::new(2, 2.0, 5.0)),
            TimelineMember::Scene(Scene::new(3, 5.0, 8.0)),
        ],
        Vec::new(),
        8.0,
    );
    let clip = ClipHandle::new("clips/combined.mp4", 8.0);

    let (parts, warning) = split_combined(&unit, &clip, &StubTrimmer).await.unwrap();

    assert!(warning.is_none());
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0].0, "scene_01");
    assert_eq!(parts[1].0, "scene_02");
    assert_eq!(parts[2].0, "scene_03");
    assert!((parts[0].1.duration - 2.0).abs() < 1e-9);
    assert!((parts[1].1.duration - 3.0).abs() < 1e-9);
    assert!((parts[2].1.duration - 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_split_combined_rescales_short_clip() {
    let unit = GenerationUnit::new(
        vec![
            TimelineMember::Scene(Scene::new(1, 0.0, 4.0)),
            TimelineMember::Scene(Scene::new(2, 4.0, 8.0)),
        ],
        Vec::new(),
        8.0,
    );
    // Generator produced less video than the members add up to.
    let clip = ClipHandle::new("clips/combined.mp4", 6.0);

    let (parts, warning) = split_combined(&unit, &clip, &StubTrimmer).await.unwrap();

    assert!(matches!(
        warning,
        Some(SegmentWarning::DurationMismatch { .. })
    ));
    assert_eq!(parts.len(), 2);
    assert!((parts[0].1.duration - 3.0).abs() < 1e-9);
    assert!((parts[1].1.duration - 3.0).abs() < 1e-9);
}
