//! Pipeline configuration.

/// Configuration for the generation run driver.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum clip generations in flight at once
    pub max_concurrent_generations: usize,
    /// Prompts longer than this are truncated before submission
    pub prompt_char_limit: usize,
    /// Price per billed second of generated video, in USD
    pub cost_per_second: f64,
    /// Reuse cached clips instead of regenerating
    pub skip_existing: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_generations: 2,
            prompt_char_limit: 1000,
            cost_per_second: 0.10,
            skip_existing: true,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_concurrent_generations: std::env::var("VGEN_MAX_CONCURRENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_concurrent_generations),
            prompt_char_limit: std::env::var("VGEN_PROMPT_CHAR_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.prompt_char_limit),
            cost_per_second: std::env::var("VGEN_COST_PER_SECOND")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cost_per_second),
            skip_existing: std::env::var("VGEN_SKIP_EXISTING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.skip_existing),
        }
    }
}
