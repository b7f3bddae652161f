//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Segmentation error: {0}")]
    Segmentation(#[from] vgen_segment::SegmentError),

    #[error("Prompt generation failed: {0}")]
    PromptFailed(String),

    #[error("Clip generation failed: {0}")]
    GenerationFailed(String),

    #[error("Clip trim failed: {0}")]
    TrimFailed(String),
}

impl PipelineError {
    pub fn prompt_failed(msg: impl Into<String>) -> Self {
        Self::PromptFailed(msg.into())
    }

    pub fn generation_failed(msg: impl Into<String>) -> Self {
        Self::GenerationFailed(msg.into())
    }

    pub fn trim_failed(msg: impl Into<String>) -> Self {
        Self::TrimFailed(msg.into())
    }

    /// Check if the error is worth retrying. Segmentation failures are
    /// deterministic; remote generation hiccups are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PipelineError::PromptFailed(_) | PipelineError::GenerationFailed(_)
        )
    }
}
