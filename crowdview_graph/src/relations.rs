//! Shared helpers for building graphs out of real relationship edges.

use crate::model::{AgentGraph, AgentGraphEdge, AgentGraphNode};
use std::collections::{HashMap, HashSet};

/// Outcome of a real-edge construction attempt.
///
/// The fallback from real edges to synthetic generation is a first-class
/// contract, not incidental control flow: callers match on this instead of
/// inspecting the graph.
#[derive(Debug)]
pub enum RelationOutcome {
    /// Real edges produced a usable induced subgraph.
    Induced(AgentGraph),
    /// Real edges exist but none connect the picked node set; the caller
    /// should synthesize edges instead.
    NeedsSynthesis,
}

/// Builds an adjacency list from canonical edges.
///
/// Neighbor lists are sorted by descending strength (ties broken by
/// ascending id) so traversals explore the strongest relationships first.
pub fn adjacency(edges: &[AgentGraphEdge]) -> HashMap<u64, Vec<(u64, f64)>> {
    let mut adj: HashMap<u64, Vec<(u64, f64)>> = HashMap::new();
    for edge in edges {
        adj.entry(edge.source).or_default().push((edge.target, edge.strength));
        adj.entry(edge.target).or_default().push((edge.source, edge.strength));
    }
    for neighbors in adj.values_mut() {
        neighbors.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    }
    adj
}

/// Ranks agents by descending degree, ties broken by ascending id.
pub fn degree_ranking(adj: &HashMap<u64, Vec<(u64, f64)>>) -> Vec<u64> {
    let mut ranked: Vec<(u64, usize)> = adj.iter().map(|(id, n)| (*id, n.len())).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().map(|(id, _)| id).collect()
}

/// Projects the edges whose both endpoints are in `picked`.
pub fn induced_edges(edges: &[AgentGraphEdge], picked: &HashSet<u64>) -> Vec<AgentGraphEdge> {
    edges
        .iter()
        .filter(|e| picked.contains(&e.source) && picked.contains(&e.target))
        .cloned()
        .collect()
}

/// Drops nodes that are not an endpoint of any surviving edge.
///
/// The force-keep id is retained unconditionally so the anchor stays
/// visible even when isolated.
pub fn filter_connected(
    nodes: Vec<AgentGraphNode>,
    edges: &[AgentGraphEdge],
    keep: Option<u64>,
) -> Vec<AgentGraphNode> {
    let mut connected: HashSet<u64> = HashSet::new();
    for edge in edges {
        connected.insert(edge.source);
        connected.insert(edge.target);
    }
    nodes
        .into_iter()
        .filter(|n| connected.contains(&n.id) || keep == Some(n.id))
        .collect()
}
