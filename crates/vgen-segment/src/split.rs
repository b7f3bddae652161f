//! Unit splitting.
//!
//! Maps a produced clip for a combined unit back to per-member output
//! segments. This is pure offset arithmetic: the actual media cut is the
//! caller's trimming collaborator. The combined clip's rendered duration
//! is the unit cap, not the sum of member durations, so offsets are taken
//! relative to cumulative member durations from the unit's start and any
//! leftover cap time past the last member is discarded.

use tracing::{debug, warn};

use vgen_models::{GenerationUnit, SplitSegment};

use crate::error::SegmentWarning;

const EPS: f64 = 1e-9;

/// The computed split for one produced clip.
#[derive(Debug, Clone)]
pub struct SplitPlan {
    /// Unit the plan belongs to
    pub unit_id: String,
    /// Ordered per-member sub-ranges, relative to the clip start
    pub segments: Vec<SplitSegment>,
    /// Set when the clip was shorter than the members and offsets were
    /// proportionally rescaled
    pub warning: Option<SegmentWarning>,
}

/// Compute per-member offsets inside a produced clip.
///
/// If the summed member durations exceed the clip's actual duration (a
/// generation-time truncation), all offsets are scaled down by
/// `produced / total` and a [`SegmentWarning::DurationMismatch`] is
/// attached; downstream stitching tolerates slightly compressed sub-clips
/// better than missing ones.
pub fn plan_split(unit: &GenerationUnit, produced_duration: f64) -> SplitPlan {
    let member_total = unit.content_duration();

    let (scale, warning) = if member_total > produced_duration + EPS {
        warn!(
            unit = %unit.id,
            member_total,
            produced = produced_duration,
            "produced clip shorter than member content, rescaling offsets"
        );
        (
            produced_duration / member_total,
            Some(SegmentWarning::DurationMismatch {
                unit_id: unit.id.clone(),
                member_total,
                produced: produced_duration,
            }),
        )
    } else {
        (1.0, None)
    };

    let mut cursor = 0.0;
    let segments = unit
        .members
        .iter()
        .map(|member| {
            let start = cursor * scale;
            cursor += member.duration();
            SplitSegment {
                member_id: member.id_str(),
                start,
                end: cursor * scale,
            }
        })
        .collect();

    debug!(unit = %unit.id, members = unit.members.len(), "split plan computed");
    SplitPlan {
        unit_id: unit.id.clone(),
        segments,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgen_models::{Scene, TimelineMember};

    fn unit(durations: &[f64]) -> GenerationUnit {
        let mut cursor = 10.0; // absolute source offsets are irrelevant here
        let members = durations
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let s = TimelineMember::Scene(Scene::new(i as u32 + 1, cursor, cursor + d));
                cursor += d;
                s
            })
            .collect();
        GenerationUnit::new(members, Vec::new(), 8.0)
    }

    #[test]
    fn test_offsets_are_cumulative_member_durations() {
        let plan = plan_split(&unit(&[2.0, 1.5, 3.0]), 8.0);
        assert!(plan.warning.is_none());
        assert_eq!(plan.segments.len(), 3);
        assert_eq!(plan.segments[0].start, 0.0);
        assert!((plan.segments[0].end - 2.0).abs() < 1e-9);
        assert!((plan.segments[1].start - 2.0).abs() < 1e-9);
        assert!((plan.segments[1].end - 3.5).abs() < 1e-9);
        assert!((plan.segments[2].end - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_leftover_cap_time_is_discarded() {
        // 6.5s of content in an 8s clip: the final 1.5s belongs to no member
        let plan = plan_split(&unit(&[2.0, 1.5, 3.0]), 8.0);
        let last_end = plan.segments.last().unwrap().end;
        assert!(last_end < 8.0);
    }

    #[test]
    fn test_member_order_preserved() {
        let plan = plan_split(&unit(&[1.0, 2.0, 0.5]), 8.0);
        let ids: Vec<&str> = plan.segments.iter().map(|s| s.member_id.as_str()).collect();
        assert_eq!(ids, vec!["scene_01", "scene_02", "scene_03"]);
        for pair in plan.segments.windows(2) {
            assert!((pair[0].end - pair[1].start).abs() < 1e-9);
        }
    }

    #[test]
    fn test_truncated_clip_rescales_offsets() {
        // 7.5s of content but the API only produced 6.0s
        let plan = plan_split(&unit(&[3.0, 4.5]), 6.0);
        assert!(matches!(
            plan.warning,
            Some(SegmentWarning::DurationMismatch { .. })
        ));
        let scale = 6.0 / 7.5;
        assert!((plan.segments[0].end - 3.0 * scale).abs() < 1e-9);
        assert!((plan.segments[1].end - 6.0).abs() < 1e-9);
        // Offsets never exceed the produced duration
        assert!(plan.segments.iter().all(|s| s.end <= 6.0 + 1e-9));
    }

    #[test]
    fn test_round_trip_sums_within_produced_duration() {
        for produced in [5.0, 6.5, 8.0] {
            let plan = plan_split(&unit(&[2.0, 1.5, 3.0]), produced);
            let total: f64 = plan.segments.iter().map(|s| s.duration()).sum();
            assert!(total <= produced + 1e-9);
        }
    }

    #[test]
    fn test_single_member_unit_maps_whole_content() {
        let plan = plan_split(&unit(&[7.0]), 8.0);
        assert_eq!(plan.segments.len(), 1);
        assert_eq!(plan.segments[0].start, 0.0);
        assert!((plan.segments[0].end - 7.0).abs() < 1e-9);
    }
}
