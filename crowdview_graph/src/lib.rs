//! CrowdView Agent Relationship Graph Builder
//!
//! Turns a raw agent population (optionally with real relationship edges)
//! into a bounded, visually coherent node/edge graph for the workbench's
//! relationship view.
//!
//! # Entry points
//!
//! - [`build_ego_agent_graph`] - the neighborhood around one focal agent
//! - [`build_sample_agent_graph`] - a representative population cross-section
//!
//! Both are pure: no I/O, no shared state, and every working set is local
//! to the call, so repeated UI re-renders can build concurrently. All
//! pseudo-randomness flows through the host's
//! [`crowdview_env::AgentDirectory`] hash, keyed by `(seed, base, index)`,
//! so identical inputs always yield identical graphs.
//!
//! # Construction pipeline
//!
//! ```text
//! raw relation edges ──► normalize ──► real-edge mode (BFS / degree rank)
//!                                          │ induced edges empty?
//!                                          ▼
//!                                   synthetic mode (seeded picks +
//!                                   group-affinity edges)
//!                                          │
//!                                          ▼
//!                                 connectivity filter (anchor kept)
//! ```
//!
//! Shortfalls never raise errors: an undersized candidate pool or a
//! disconnected neighborhood simply produces a smaller graph.
//!
//! # Example
//!
//! ```
//! use crowdview_env::SeededDirectory;
//! use crowdview_graph::{build_ego_agent_graph, EgoGraphConfig};
//!
//! let dir = SeededDirectory::new();
//! let graph = build_ego_agent_graph(&dir, EgoGraphConfig {
//!     seed: 1,
//!     focus_id: 5,
//!     sample_agents: 100,
//!     max_nodes: 10,
//!     ..Default::default()
//! });
//!
//! assert!(graph.nodes.iter().any(|n| n.id == 5));
//! assert!(graph.nodes.len() <= 10);
//! ```

mod ego;
mod error;
mod exporter;
mod model;
mod normalize;
mod relations;
mod sample;
mod select;
mod synth;

pub use ego::{build_ego_agent_graph, EgoGraphConfig, FOLLOW_STRENGTH};
pub use error::GraphError;
pub use exporter::GraphExport;
pub use model::{
    AgentGraph, AgentGraphEdge, AgentGraphNode, EdgeKind, RelationEdgeInput, DEFAULT_STRENGTH,
    STRENGTH_MAX, STRENGTH_MIN,
};
pub use normalize::normalize_relation_edges;
pub use relations::{filter_connected, RelationOutcome};
pub use sample::{build_sample_agent_graph, SampleGraphConfig};
pub use select::pick_ids_deterministic;
