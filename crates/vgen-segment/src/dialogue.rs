//! Dialogue allocation.
//!
//! Maps word-level transcript spans onto the chunked/normalized timeline.
//! Spans that straddle a member boundary are split at a word boundary;
//! spans that fall wholly inside a chunk-overlap region are duplicated
//! into both chunks so the overlapping clips carry the same dialogue.

use tracing::{debug, warn};

use vgen_models::{DialogueSpan, TimelineMember, UnitDialogue};

use crate::error::SegmentWarning;

const EPS: f64 = 1e-9;

/// Per-member dialogue assignments, indexed like the member slice passed
/// to [`allocate_dialogue`].
pub type MemberDialogue = Vec<Vec<UnitDialogue>>;

/// Assign each dialogue span to the timeline members it belongs to.
///
/// Returns the per-member assignment plus non-fatal warnings for spans
/// that matched nothing. Allocation is deterministic: the same inputs
/// always produce the same assignment.
pub fn allocate_dialogue(
    members: &[TimelineMember],
    spans: &[DialogueSpan],
) -> (MemberDialogue, Vec<SegmentWarning>) {
    let mut assigned: MemberDialogue = vec![Vec::new(); members.len()];
    let mut warnings = Vec::new();

    for span in spans {
        let hits: Vec<usize> = members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.intersects(span.start, span.end))
            .map(|(i, _)| i)
            .collect();

        match hits.as_slice() {
            [] => {
                warn!(
                    text = %span.text,
                    start = span.start,
                    end = span.end,
                    "dialogue span matched no timeline member, dropping"
                );
                warnings.push(SegmentWarning::OrphanDialogue {
                    text: span.text.clone(),
                    start: span.start,
                    end: span.end,
                });
            }
            [single] => {
                assigned[*single].push(UnitDialogue {
                    text: span.text.clone(),
                    start: span.start,
                    end: span.end,
                    from_overlap: false,
                });
            }
            [a, b] if span_inside_overlap(span, &members[*a], &members[*b]) => {
                debug!(text = %span.text, "span inside chunk overlap, duplicating");
                for &i in &[*a, *b] {
                    assigned[i].push(UnitDialogue {
                        text: span.text.clone(),
                        start: span.start,
                        end: span.end,
                        from_overlap: true,
                    });
                }
            }
            _ => split_across_members(span, members, &hits, &mut assigned),
        }
    }

    (assigned, warnings)
}

/// Whether the span lies entirely within the overlap region shared by two
/// consecutive chunks of the same parent scene.
fn span_inside_overlap(span: &DialogueSpan, a: &TimelineMember, b: &TimelineMember) -> bool {
    match a.overlap_region_with(b) {
        Some((start, end)) => span.start >= start - EPS && span.end <= end + EPS,
        None => false,
    }
}

/// Split a straddling span across its intersecting members at word
/// boundaries.
///
/// For each adjacent pair of hit members A and B, the cut point is the
/// midpoint of `A.end` and `B.start`; words whose (interpolated) end time
/// is at or before the midpoint stay with A, the rest move on. A word is
/// never divided.
fn split_across_members(
    span: &DialogueSpan,
    members: &[TimelineMember],
    hits: &[usize],
    assigned: &mut MemberDialogue,
) {
    let words = span.word_timings();
    if words.is_empty() {
        return;
    }

    let midpoints: Vec<f64> = hits
        .windows(2)
        .map(|pair| (members[pair[0]].end() + members[pair[1]].start()) / 2.0)
        .collect();

    let mut member_pos = 0usize;
    let mut buckets: Vec<Vec<&(String, f64, f64)>> = vec![Vec::new(); hits.len()];
    for word in &words {
        while member_pos < midpoints.len() && word.2 > midpoints[member_pos] + EPS {
            member_pos += 1;
        }
        buckets[member_pos].push(word);
    }

    for (bucket, &member_index) in buckets.iter().zip(hits) {
        if bucket.is_empty() {
            continue;
        }
        let text = bucket
            .iter()
            .map(|(w, _, _)| w.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assigned[member_index].push(UnitDialogue {
            text,
            start: bucket.first().unwrap().1,
            end: bucket.last().unwrap().2,
            from_overlap: false,
        });
    }
}
