//! Synthetic group-affinity edge generation.
//!
//! When no real relationship edges are usable, both builders fall back to
//! weaving the sampled nodes together along cohort lines: a few same-group
//! partners per node plus the occasional cross-group link, so the rendered
//! graph clusters by cohort instead of degenerating into a star.

use crate::model::{AgentGraphEdge, EdgeKind};
use crate::select::pick_ids_deterministic;
use crowdview_env::AgentDirectory;
use std::collections::HashSet;

/// Same-group partners considered per node.
pub const SAME_GROUP_PICKS: usize = 3;

/// Cross-group partners considered per node.
pub const CROSS_GROUP_PICKS: usize = 1;

/// Seeds and strengths for one round of group-edge synthesis.
///
/// Ego and sample graphs use different values so the two views never share
/// a selection stream.
#[derive(Debug, Clone, Copy)]
pub struct GroupEdgeParams {
    pub same_seed: u64,
    pub cross_seed: u64,
    pub same_strength: f64,
    pub cross_strength: f64,
}

/// Adds same-group and cross-group edges over the sampled node set.
///
/// For each node, partners are chosen deterministically from the other
/// sampled nodes (never the full population). Edges whose unordered pair is
/// already in `seen` are skipped.
pub fn synthesize_group_edges<D: AgentDirectory>(
    dir: &D,
    node_ids: &[u64],
    params: GroupEdgeParams,
    edges: &mut Vec<AgentGraphEdge>,
    seen: &mut HashSet<(u64, u64)>,
) {
    for &a in node_ids {
        let group = dir.agent_group(a);
        let mut same: Vec<u64> = Vec::new();
        let mut cross: Vec<u64> = Vec::new();
        for &b in node_ids {
            if b == a {
                continue;
            }
            if dir.agent_group(b) == group {
                same.push(b);
            } else {
                cross.push(b);
            }
        }

        let mut used = HashSet::new();
        for idx in pick_ids_deterministic(
            dir,
            params.same_seed,
            a,
            SAME_GROUP_PICKS,
            same.len() as u64,
            &mut used,
        ) {
            let edge =
                AgentGraphEdge::between(a, same[idx as usize], params.same_strength, EdgeKind::Group);
            if seen.insert(edge.pair()) {
                edges.push(edge);
            }
        }

        let mut used = HashSet::new();
        for idx in pick_ids_deterministic(
            dir,
            params.cross_seed,
            a,
            CROSS_GROUP_PICKS,
            cross.len() as u64,
            &mut used,
        ) {
            let edge = AgentGraphEdge::between(
                a,
                cross[idx as usize],
                params.cross_strength,
                EdgeKind::Message,
            );
            if seen.insert(edge.pair()) {
                edges.push(edge);
            }
        }
    }
}
