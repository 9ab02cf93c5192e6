//! Canonicalization of untrusted relationship edges.
//!
//! This is the single choke point between caller-supplied data and the
//! canonical edge type: everything downstream may assume ordered endpoints,
//! no self-loops, and in-range strengths.

use crate::model::{
    AgentGraphEdge, EdgeKind, RelationEdgeInput, DEFAULT_STRENGTH, STRENGTH_MAX, STRENGTH_MIN,
};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Maps raw caller edges to canonical form.
///
/// Dropped outright: edges with non-finite or negative ids, self-loops, and
/// (when `valid_ids` is supplied) edges touching an unknown agent.
/// Fractional ids are truncated. Missing or non-finite strengths default to
/// [`DEFAULT_STRENGTH`]; everything else is clamped into the strength
/// domain. Missing kinds default to [`EdgeKind::Follow`].
///
/// When several raw edges collapse to the same unordered pair, the one with
/// the highest strength wins; output order is the first-seen order of
/// surviving pairs.
pub fn normalize_relation_edges(
    raw: &[RelationEdgeInput],
    valid_ids: Option<&HashSet<u64>>,
) -> Vec<AgentGraphEdge> {
    let mut out: Vec<AgentGraphEdge> = Vec::new();
    let mut by_pair: HashMap<(u64, u64), usize> = HashMap::new();

    for edge in raw {
        if !edge.source.is_finite() || !edge.target.is_finite() {
            continue;
        }
        let source = edge.source.trunc();
        let target = edge.target.trunc();
        if source < 0.0 || target < 0.0 {
            continue;
        }
        let (a, b) = (source as u64, target as u64);
        if a == b {
            continue;
        }
        if let Some(valid) = valid_ids {
            if !valid.contains(&a) || !valid.contains(&b) {
                continue;
            }
        }

        let strength = match edge.strength {
            Some(s) if s.is_finite() => s.clamp(STRENGTH_MIN, STRENGTH_MAX),
            _ => DEFAULT_STRENGTH,
        };
        let kind = edge.kind.unwrap_or(EdgeKind::Follow);
        let canonical = AgentGraphEdge::between(a, b, strength, kind);

        match by_pair.entry(canonical.pair()) {
            Entry::Occupied(slot) => {
                let existing = &mut out[*slot.get()];
                if canonical.strength > existing.strength {
                    *existing = canonical;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(out.len());
                out.push(canonical);
            }
        }
    }

    out
}
