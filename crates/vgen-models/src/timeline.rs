//! Timeline member models (scenes and chunks).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::format_seconds;

/// A scene detected in the source video.
///
/// Scenes are created once from detector output and never mutated after
/// normalization. A scene longer than the unit cap is superseded by its
/// chunks rather than modified in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// Unique ID within the video (1-indexed, dense monotonic sequence)
    pub id: u32,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds (always greater than start)
    pub end: f64,
}

impl Scene {
    pub fn new(id: u32, start: f64, end: f64) -> Self {
        Self { id, start, end }
    }

    /// Duration in seconds, always recomputed from the boundaries.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Stable string identifier matching the `scene_NN` naming scheme.
    pub fn id_str(&self) -> String {
        format!("scene_{:02}", self.id)
    }

    /// Start timestamp formatted as HH:MM:SS.mmm.
    pub fn start_time(&self) -> String {
        format_seconds(self.start)
    }

    /// End timestamp formatted as HH:MM:SS.mmm.
    pub fn end_time(&self) -> String {
        format_seconds(self.end)
    }
}

/// A sub-interval of a scene that exceeded the unit cap.
///
/// Consecutive chunks of the same parent overlap by a configured amount
/// so the generated clips can be stitched without visible seams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Chunk {
    /// ID of the originating scene
    pub parent_id: u32,

    /// Chunk number within the parent (1-indexed)
    pub index: u32,

    /// Total number of chunks the parent was split into
    pub total: u32,

    /// Start time in seconds (absolute, not parent-relative)
    pub start: f64,

    /// End time in seconds (absolute)
    pub end: f64,

    /// Seconds shared with the preceding chunk (0 for the first chunk)
    pub overlap_with_prev: f64,

    /// Seconds shared with the following chunk (0 for the last chunk)
    pub overlap_with_next: f64,
}

impl Chunk {
    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Stable string identifier matching the `scene_NN_chunk_MM` scheme.
    pub fn id_str(&self) -> String {
        format!("scene_{:02}_chunk_{:02}", self.parent_id, self.index)
    }

    /// Time range shared with the preceding chunk, if any.
    pub fn overlap_region_prev(&self) -> Option<(f64, f64)> {
        if self.overlap_with_prev > 0.0 {
            Some((self.start, self.start + self.overlap_with_prev))
        } else {
            None
        }
    }
}

/// A member of the chunked/normalized timeline.
///
/// Replaces the loosely-typed per-scene dictionaries of earlier iterations:
/// every member carries mandatory boundaries, and downstream code matches
/// exhaustively instead of null-checking optional keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineMember {
    Scene(Scene),
    Chunk(Chunk),
}

impl TimelineMember {
    pub fn start(&self) -> f64 {
        match self {
            TimelineMember::Scene(s) => s.start,
            TimelineMember::Chunk(c) => c.start,
        }
    }

    pub fn end(&self) -> f64 {
        match self {
            TimelineMember::Scene(s) => s.end,
            TimelineMember::Chunk(c) => c.end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end() - self.start()
    }

    pub fn id_str(&self) -> String {
        match self {
            TimelineMember::Scene(s) => s.id_str(),
            TimelineMember::Chunk(c) => c.id_str(),
        }
    }

    /// Whether this member intersects the half-open range `[start, end)`.
    pub fn intersects(&self, start: f64, end: f64) -> bool {
        self.start() < end && start < self.end()
    }

    /// Returns the two chunks' shared overlap region when `self` and `other`
    /// are consecutive chunks of the same parent scene.
    pub fn overlap_region_with(&self, other: &TimelineMember) -> Option<(f64, f64)> {
        match (self, other) {
            (TimelineMember::Chunk(a), TimelineMember::Chunk(b))
                if a.parent_id == b.parent_id && b.index == a.index + 1 =>
            {
                b.overlap_region_prev()
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_duration_is_derived() {
        let s = Scene::new(3, 1.5, 4.0);
        assert!((s.duration() - 2.5).abs() < 1e-9);
        assert_eq!(s.id_str(), "scene_03");
    }

    #[test]
    fn test_chunk_id_and_overlap_region() {
        let c = Chunk {
            parent_id: 2,
            index: 2,
            total: 3,
            start: 7.0,
            end: 14.0,
            overlap_with_prev: 1.0,
            overlap_with_next: 1.0,
        };
        assert_eq!(c.id_str(), "scene_02_chunk_02");
        assert_eq!(c.overlap_region_prev(), Some((7.0, 8.0)));
    }

    #[test]
    fn test_member_intersects_half_open() {
        let m = TimelineMember::Scene(Scene::new(1, 2.0, 5.0));
        assert!(m.intersects(4.9, 6.0));
        assert!(!m.intersects(5.0, 6.0));
        assert!(!m.intersects(0.0, 2.0));
    }

    #[test]
    fn test_overlap_region_with_consecutive_chunks() {
        let a = TimelineMember::Chunk(Chunk {
            parent_id: 1,
            index: 1,
            total: 2,
            start: 0.0,
            end: 8.0,
            overlap_with_prev: 0.0,
            overlap_with_next: 1.0,
        });
        let b = TimelineMember::Chunk(Chunk {
            parent_id: 1,
            index: 2,
            total: 2,
            start: 7.0,
            end: 12.0,
            overlap_with_prev: 1.0,
            overlap_with_next: 0.0,
        });
        assert_eq!(a.overlap_region_with(&b), Some((7.0, 8.0)));

        let s = TimelineMember::Scene(Scene::new(2, 12.0, 14.0));
        assert_eq!(b.overlap_region_with(&s), None);
    }
}
