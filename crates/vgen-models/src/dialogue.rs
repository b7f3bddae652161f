//! Dialogue span models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One timestamped transcript unit from the speech-to-text engine.
///
/// Spans are read-only input. When a span straddles a timeline boundary it
/// is split into derived spans at a word boundary; the original is never
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DialogueSpan {
    /// Transcribed text (a word or short phrase)
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,
}

impl DialogueSpan {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this span intersects the half-open range `[start, end)`.
    pub fn intersects(&self, start: f64, end: f64) -> bool {
        self.start < end && start < self.end
    }

    /// Per-word sub-ranges, interpolated across the span weighted by word
    /// length. Word timings from the transcription engine are only reliable
    /// at span granularity, so interior boundaries are estimates; they are
    /// used to pick split points, never to cut inside a word.
    pub fn word_timings(&self) -> Vec<(String, f64, f64)> {
        let words: Vec<&str> = self.text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }
        let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
        if total_chars == 0 {
            return Vec::new();
        }

        let duration = self.duration();
        let mut out = Vec::with_capacity(words.len());
        let mut consumed = 0usize;
        for word in words {
            let chars = word.chars().count();
            let start = self.start + duration * (consumed as f64 / total_chars as f64);
            consumed += chars;
            let end = self.start + duration * (consumed as f64 / total_chars as f64);
            out.push((word.to_string(), start, end));
        }
        // Last word ends exactly at the span end regardless of rounding
        if let Some(last) = out.last_mut() {
            last.2 = self.end;
        }
        out
    }
}
