//! Unit packing.
//!
//! Greedy first-fit grouping of timeline members into generation units.
//! The walk never reorders members: narrative sequence is worth more than
//! packing optimality, and the deterministic single pass still captures
//! the real-world savings of filling 8-second units with short scenes.

use tracing::{debug, info};

use vgen_models::{GenerationUnit, SegmentationConfig, TimelineMember, UnitDialogue};

use crate::dialogue::MemberDialogue;

const EPS: f64 = 1e-9;

/// Pack members into generation units bounded by the unit cap.
///
/// A member is appended to the open group while the summed duration stays
/// within `unit_cap - packing_safety_margin`; otherwise the group closes
/// and a new one starts. Every unit bills the full cap (flat per-unit
/// pricing), regardless of how much content it carries.
pub fn pack_units(
    members: Vec<TimelineMember>,
    dialogue: MemberDialogue,
    config: &SegmentationConfig,
) -> Vec<GenerationUnit> {
    debug_assert_eq!(members.len(), dialogue.len());
    let budget = config.unit_cap - config.packing_safety_margin;

    let mut units = Vec::new();
    let mut group: Vec<TimelineMember> = Vec::new();
    let mut group_dialogue: Vec<UnitDialogue> = Vec::new();
    let mut group_duration = 0.0;

    for (member, fragments) in members.into_iter().zip(dialogue) {
        // Post-chunking, no member can exceed the cap; a violation here is
        // a bug upstream, not a runtime condition.
        debug_assert!(
            member.duration() <= config.unit_cap + EPS,
            "member {} exceeds unit cap",
            member.id_str()
        );

        let fits = group_duration + member.duration() <= budget + EPS;
        if !group.is_empty() && !fits {
            units.push(close_group(
                std::mem::take(&mut group),
                std::mem::take(&mut group_dialogue),
                config.unit_cap,
            ));
            group_duration = 0.0;
        }

        group_duration += member.duration();
        group.push(member);
        extend_dialogue(&mut group_dialogue, fragments);
    }

    if !group.is_empty() {
        units.push(close_group(group, group_dialogue, config.unit_cap));
    }

    let combined = units.iter().filter(|u| u.is_combined).count();
    info!(
        units = units.len(),
        combined,
        billed_seconds = units.len() as f64 * config.unit_cap,
        "packing complete"
    );
    units
}

fn close_group(
    members: Vec<TimelineMember>,
    dialogue: Vec<UnitDialogue>,
    unit_cap: f64,
) -> GenerationUnit {
    let unit = GenerationUnit::new(members, dialogue, unit_cap);
    debug!(unit = %unit.id, content = unit.content_duration(), "closed generation unit");
    unit
}

/// Append a member's dialogue fragments to the open group, skipping an
/// overlap-duplicated fragment whose twin already landed in this group.
/// Duplication only means something across units; within one unit the
/// prompt would just repeat itself.
fn extend_dialogue(group_dialogue: &mut Vec<UnitDialogue>, fragments: Vec<UnitDialogue>) {
    for fragment in fragments {
        let duplicate = fragment.from_overlap
            && group_dialogue.iter().any(|d| {
                d.from_overlap
                    && d.text == fragment.text
                    && (d.start - fragment.start).abs() < EPS
                    && (d.end - fragment.end).abs() < EPS
            });
        if !duplicate {
            group_dialogue.push(fragment);
        }
    }
}
