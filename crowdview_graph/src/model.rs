//! Graph value types.
//!
//! Canonical nodes and edges are plain value objects with no identity beyond
//! their ids. Raw caller edges are a separate, untrusted type; only
//! [`crate::normalize::normalize_relation_edges`] turns them into canonical
//! edges, so the edge invariants (ordered endpoints, no self-loops, clamped
//! strength) hold everywhere downstream.

use crowdview_env::AgentDirectory;
use serde::{Deserialize, Serialize};

/// Strength assigned to a raw edge that carries none.
pub const DEFAULT_STRENGTH: f64 = 0.6;

/// Lower bound of the edge strength domain.
pub const STRENGTH_MIN: f64 = 0.1;

/// Upper bound of the edge strength domain.
pub const STRENGTH_MAX: f64 = 1.0;

/// Relationship category carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Same-cohort affinity.
    Group,
    /// Cross-cohort message traffic.
    Message,
    /// Follow relationship.
    Follow,
}

/// A single agent in the rendered graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentGraphNode {
    /// Stable agent identifier.
    pub id: u64,
    /// Display label, derived from the id by the host directory.
    pub label: String,
    /// Group key, derived from the id by the host directory.
    pub group: String,
}

impl AgentGraphNode {
    /// Derives a node for `id` through the host directory.
    pub fn derive<D: AgentDirectory>(dir: &D, id: u64) -> Self {
        Self {
            id,
            label: dir.agent_name(id),
            group: dir.agent_group(id),
        }
    }
}

/// An undirected relationship between two agents.
///
/// Always canonical: `source < target`. Construct through
/// [`AgentGraphEdge::between`] so the ordering never depends on call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentGraphEdge {
    pub source: u64,
    pub target: u64,
    /// Always within `[STRENGTH_MIN, STRENGTH_MAX]`.
    pub strength: f64,
    pub kind: EdgeKind,
}

impl AgentGraphEdge {
    /// Builds a canonical edge between two distinct agents.
    pub fn between(a: u64, b: u64, strength: f64, kind: EdgeKind) -> Self {
        debug_assert_ne!(a, b, "self-loops are filtered before construction");
        let (source, target) = if a < b { (a, b) } else { (b, a) };
        Self {
            source,
            target,
            strength,
            kind,
        }
    }

    /// The unordered endpoint pair, in canonical order.
    pub fn pair(&self) -> (u64, u64) {
        (self.source, self.target)
    }

    /// Whether `id` is one of the endpoints.
    pub fn touches(&self, id: u64) -> bool {
        self.source == id || self.target == id
    }
}

/// The graph snapshot returned to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentGraph {
    pub nodes: Vec<AgentGraphNode>,
    pub edges: Vec<AgentGraphEdge>,
}

impl AgentGraph {
    /// An empty graph.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Whether the graph contains a node with the given id.
    pub fn contains_node(&self, id: u64) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// Raw relationship edge as supplied by the caller.
///
/// Untrusted: ids arrive as floats (so fractional and non-finite junk
/// survives deserialization and is rejected during normalization rather
/// than by the parser), strengths may be missing or out of range, and the
/// same pair may appear multiple times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationEdgeInput {
    pub source: f64,
    pub target: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EdgeKind>,
}

impl RelationEdgeInput {
    /// Convenience constructor for well-formed input.
    pub fn new(source: u64, target: u64) -> Self {
        Self {
            source: source as f64,
            target: target as f64,
            strength: None,
            kind: None,
        }
    }

    /// Sets the strength.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = Some(strength);
        self
    }

    /// Sets the kind.
    pub fn with_kind(mut self, kind: EdgeKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Derives nodes for a list of agent ids, preserving order.
pub fn derive_nodes<D: AgentDirectory>(dir: &D, ids: &[u64]) -> Vec<AgentGraphNode> {
    ids.iter().map(|&id| AgentGraphNode::derive(dir, id)).collect()
}
