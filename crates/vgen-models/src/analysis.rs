//! Scene analysis models.
//!
//! The prompt-generation model returns structured JSON for most units, but
//! occasionally produces output that fails to parse. Instead of ad hoc
//! missing-key fallbacks, the result is a tagged enum so downstream code
//! pattern-matches exhaustively.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Diagnostic flags attached to a parsed analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisDiagnostics {
    /// Scene contains significant on-screen text
    pub text_heavy: bool,
    /// Camera moves during the scene
    pub camera_motion: bool,
    /// Multiple or detailed characters present
    pub complex_characters: bool,
    /// Fast motion that generation models handle poorly
    pub rapid_motion: bool,
    /// Content duration exceeds the unit cap
    pub duration_warning: bool,
}

/// Result of analyzing a generation unit with the vision/language model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SceneAnalysis {
    /// The model returned well-formed structured output.
    Parsed {
        /// Brief summary of the sequence
        description: String,
        /// Detailed generation prompt
        scene_prompt: String,
        /// Camera, lighting and grading notes
        cinematic_notes: String,
        /// Diagnostic flags
        diagnostics: AnalysisDiagnostics,
    },
    /// The model's response could not be parsed as structured output.
    /// The raw text is preserved in full and used as the prompt directly.
    Unparsed {
        /// Complete raw model response
        raw_text: String,
    },
}

impl SceneAnalysis {
    /// The text to send to the clip-generation API, regardless of whether
    /// the analysis parsed cleanly.
    pub fn prompt_text(&self) -> &str {
        match self {
            SceneAnalysis::Parsed { scene_prompt, .. } => scene_prompt,
            SceneAnalysis::Unparsed { raw_text } => raw_text,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, SceneAnalysis::Parsed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text_for_both_variants() {
        let parsed = SceneAnalysis::Parsed {
            description: "desc".into(),
            scene_prompt: "a detailed prompt".into(),
            cinematic_notes: "notes".into(),
            diagnostics: AnalysisDiagnostics::default(),
        };
        assert_eq!(parsed.prompt_text(), "a detailed prompt");
        assert!(parsed.is_parsed());

        let unparsed = SceneAnalysis::Unparsed {
            raw_text: "free-form response".into(),
        };
        assert_eq!(unparsed.prompt_text(), "free-form response");
        assert!(!unparsed.is_parsed());
    }

    #[test]
    fn test_serde_tagging() {
        let unparsed = SceneAnalysis::Unparsed {
            raw_text: "x".into(),
        };
        let json = serde_json::to_value(&unparsed).unwrap();
        assert_eq!(json["status"], "unparsed");
    }
}
