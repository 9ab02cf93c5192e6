//! Representative population samples: a cross-section of the whole crowd.

use crate::model::{derive_nodes, AgentGraph, AgentGraphEdge, RelationEdgeInput};
use crate::normalize::normalize_relation_edges;
use crate::relations::{adjacency, degree_ranking, filter_connected, induced_edges, RelationOutcome};
use crate::synth::{synthesize_group_edges, GroupEdgeParams};
use crowdview_env::AgentDirectory;
use std::collections::HashSet;

/// Strength of synthetic same-group edges in the sample view.
pub const SAMPLE_SAME_GROUP_STRENGTH: f64 = 0.45;

/// Strength of synthetic cross-group edges in the sample view.
pub const SAMPLE_CROSS_GROUP_STRENGTH: f64 = 0.25;

const SAMPLE_SAME_SEED_OFFSET: u64 = 101;
const SAMPLE_CROSS_SEED_OFFSET: u64 = 131;

/// Configuration for [`build_sample_agent_graph`].
#[derive(Debug, Clone)]
pub struct SampleGraphConfig {
    /// Master seed for all deterministic selection.
    pub seed: u64,

    /// Agent that must appear in the sample (e.g. the current selection).
    pub ensure_id: Option<u64>,

    /// Population bound.
    pub sample_agents: u64,

    /// Node budget; clamped to a minimum of 2.
    pub max_nodes: usize,

    /// Raw relationship edges, if the simulation has real ones.
    pub relation_edges: Vec<RelationEdgeInput>,

    /// Restricts raw edges to known agent ids when supplied.
    pub valid_agent_ids: Option<HashSet<u64>>,
}

impl Default for SampleGraphConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ensure_id: None,
            sample_agents: 200,
            max_nodes: 40,
            relation_edges: Vec::new(),
            valid_agent_ids: None,
        }
    }
}

/// Builds a representative sample of the population.
///
/// Real relationship edges take precedence: the sample is then the
/// most-connected agents (seeded with `ensure_id`), carrying only real
/// edges. Without usable real edges, the sample is the dense id prefix with
/// synthetic group-affinity edges, weaker than the ego view's since this is
/// a cross-section rather than a focused relationship view.
pub fn build_sample_agent_graph<D: AgentDirectory>(
    dir: &D,
    config: SampleGraphConfig,
) -> AgentGraph {
    let max_nodes = config.max_nodes.max(2);

    let canonical = normalize_relation_edges(&config.relation_edges, config.valid_agent_ids.as_ref());
    if !canonical.is_empty() {
        match sample_from_relations(
            dir,
            config.ensure_id,
            config.sample_agents,
            max_nodes,
            &canonical,
            config.valid_agent_ids.as_ref(),
        ) {
            RelationOutcome::Induced(graph) => return graph,
            RelationOutcome::NeedsSynthesis => {}
        }
    }

    synthetic_sample(dir, config.seed, config.ensure_id, config.sample_agents, max_nodes)
}

/// Real-edge mode: fill by descending degree, then by ascending id.
fn sample_from_relations<D: AgentDirectory>(
    dir: &D,
    ensure_id: Option<u64>,
    sample_agents: u64,
    max_nodes: usize,
    edges: &[AgentGraphEdge],
    valid_ids: Option<&HashSet<u64>>,
) -> RelationOutcome {
    let adj = adjacency(edges);

    let mut picked: HashSet<u64> = HashSet::new();
    let mut order: Vec<u64> = Vec::new();
    if let Some(id) = ensure_id {
        picked.insert(id);
        order.push(id);
    }

    for id in degree_ranking(&adj) {
        if order.len() >= max_nodes {
            break;
        }
        if picked.insert(id) {
            order.push(id);
        }
    }

    // Degree list exhausted; pad with known agents in ascending order.
    if order.len() < max_nodes {
        let fallback: Vec<u64> = match valid_ids {
            Some(valid) => {
                let mut ids: Vec<u64> = valid.iter().copied().collect();
                ids.sort_unstable();
                ids
            }
            None => (0..sample_agents).collect(),
        };
        for id in fallback {
            if order.len() >= max_nodes {
                break;
            }
            if picked.insert(id) {
                order.push(id);
            }
        }
    }

    let induced = induced_edges(edges, &picked);
    if induced.is_empty() {
        return RelationOutcome::NeedsSynthesis;
    }

    let nodes = filter_connected(derive_nodes(dir, &order), &induced, ensure_id);
    RelationOutcome::Induced(AgentGraph { nodes, edges: induced })
}

/// Synthetic mode: dense id prefix with group-affinity edges.
fn synthetic_sample<D: AgentDirectory>(
    dir: &D,
    seed: u64,
    ensure_id: Option<u64>,
    sample_agents: u64,
    max_nodes: usize,
) -> AgentGraph {
    let base = (max_nodes as u64).min(sample_agents);
    let mut ids: Vec<u64> = (0..base).collect();

    // Swap-in happens before any edge is synthesized, so no edge can end up
    // referencing the evicted slot.
    if let Some(ensure) = ensure_id {
        if ensure < sample_agents && !ids.contains(&ensure) {
            if let Some(last) = ids.last_mut() {
                *last = ensure;
            }
        }
    }

    let mut edges: Vec<AgentGraphEdge> = Vec::new();
    let mut seen: HashSet<(u64, u64)> = HashSet::new();
    synthesize_group_edges(
        dir,
        &ids,
        GroupEdgeParams {
            same_seed: seed.wrapping_add(SAMPLE_SAME_SEED_OFFSET),
            cross_seed: seed.wrapping_add(SAMPLE_CROSS_SEED_OFFSET),
            same_strength: SAMPLE_SAME_GROUP_STRENGTH,
            cross_strength: SAMPLE_CROSS_GROUP_STRENGTH,
        },
        &mut edges,
        &mut seen,
    );

    let nodes = filter_connected(derive_nodes(dir, &ids), &edges, ensure_id);
    AgentGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeKind, STRENGTH_MAX, STRENGTH_MIN};
    use crowdview_env::SeededDirectory;

    fn raw(a: u64, b: u64, strength: f64) -> RelationEdgeInput {
        RelationEdgeInput::new(a, b).with_strength(strength)
    }

    #[test]
    fn test_synthetic_dense_prefix() {
        let dir = SeededDirectory::new();
        let graph = build_sample_agent_graph(
            &dir,
            SampleGraphConfig {
                seed: 1,
                sample_agents: 50,
                max_nodes: 5,
                ..Default::default()
            },
        );

        let ids: HashSet<u64> = graph.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, (0..5).collect());

        for edge in &graph.edges {
            assert!(matches!(edge.kind, EdgeKind::Group | EdgeKind::Message));
            let expected = match edge.kind {
                EdgeKind::Group => SAMPLE_SAME_GROUP_STRENGTH,
                EdgeKind::Message => SAMPLE_CROSS_GROUP_STRENGTH,
                EdgeKind::Follow => unreachable!(),
            };
            assert_eq!(edge.strength, expected);
        }
    }

    #[test]
    fn test_deterministic() {
        let dir = SeededDirectory::new();
        let config = SampleGraphConfig {
            seed: 9,
            ensure_id: Some(17),
            sample_agents: 300,
            max_nodes: 20,
            ..Default::default()
        };

        let a = build_sample_agent_graph(&dir, config.clone());
        let b = build_sample_agent_graph(&dir, config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ensure_id_swaps_last_slot() {
        let dir = SeededDirectory::new();
        let graph = build_sample_agent_graph(
            &dir,
            SampleGraphConfig {
                seed: 1,
                ensure_id: Some(30),
                sample_agents: 50,
                max_nodes: 5,
                ..Default::default()
            },
        );

        let ids: HashSet<u64> = graph.nodes.iter().map(|n| n.id).collect();
        assert!(ids.contains(&30));
        assert!(!ids.contains(&4), "the last prefix slot is evicted");
        assert_eq!(graph.nodes.len(), 5);
    }

    #[test]
    fn test_ensure_id_already_present_no_swap() {
        let dir = SeededDirectory::new();
        let graph = build_sample_agent_graph(
            &dir,
            SampleGraphConfig {
                seed: 1,
                ensure_id: Some(2),
                sample_agents: 50,
                max_nodes: 5,
                ..Default::default()
            },
        );

        let ids: HashSet<u64> = graph.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, (0..5).collect());
    }

    #[test]
    fn test_ensure_id_out_of_bounds_ignored() {
        let dir = SeededDirectory::new();
        let graph = build_sample_agent_graph(
            &dir,
            SampleGraphConfig {
                seed: 1,
                ensure_id: Some(99),
                sample_agents: 50,
                max_nodes: 5,
                ..Default::default()
            },
        );

        let ids: HashSet<u64> = graph.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, (0..5).collect());
    }

    #[test]
    fn test_real_mode_ranks_by_degree() {
        let dir = SeededDirectory::new();
        let graph = build_sample_agent_graph(
            &dir,
            SampleGraphConfig {
                seed: 1,
                sample_agents: 100,
                max_nodes: 3,
                relation_edges: vec![raw(10, 11, 0.5), raw(10, 12, 0.5), raw(10, 13, 0.5)],
                ..Default::default()
            },
        );

        let ids: HashSet<u64> = graph.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, [10, 11, 12].into_iter().collect());
        assert!(graph.edges.iter().all(|e| e.touches(10)));
    }

    #[test]
    fn test_real_mode_fill_drops_isolated() {
        let dir = SeededDirectory::new();
        let graph = build_sample_agent_graph(
            &dir,
            SampleGraphConfig {
                seed: 1,
                sample_agents: 10,
                max_nodes: 4,
                relation_edges: vec![raw(5, 6, 0.5)],
                ..Default::default()
            },
        );

        // The ascending fill (0, 1) pads the pick but carries no edges, so
        // the connectivity filter drops it again.
        let ids: HashSet<u64> = graph.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, [5, 6].into_iter().collect());
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_real_mode_ensured_anchor_survives() {
        let dir = SeededDirectory::new();
        let graph = build_sample_agent_graph(
            &dir,
            SampleGraphConfig {
                seed: 1,
                ensure_id: Some(7),
                sample_agents: 100,
                max_nodes: 3,
                relation_edges: vec![raw(20, 21, 0.5), raw(20, 22, 0.5)],
                ..Default::default()
            },
        );

        // 7 has no real edges but is kept as the anchor.
        assert!(graph.contains_node(7));
        assert!(graph.contains_node(20));
    }

    #[test]
    fn test_empty_population_yields_empty_graph() {
        let dir = SeededDirectory::new();
        let graph = build_sample_agent_graph(
            &dir,
            SampleGraphConfig {
                seed: 1,
                sample_agents: 0,
                max_nodes: 10,
                ..Default::default()
            },
        );

        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn raw_edge_strategy() -> impl Strategy<Value = RelationEdgeInput> {
            (
                prop::num::f64::ANY,
                prop::num::f64::ANY,
                prop::option::of(prop::num::f64::ANY),
            )
                .prop_map(|(source, target, strength)| RelationEdgeInput {
                    source,
                    target,
                    strength,
                    kind: None,
                })
        }

        proptest! {
            #[test]
            fn invariants_hold(
                seed in 0u64..1000,
                ensure_id in prop::option::of(0u64..64),
                sample_agents in 0u64..256,
                max_nodes in 2usize..32,
                edges in prop::collection::vec(raw_edge_strategy(), 0..16),
            ) {
                let dir = SeededDirectory::new();
                let config = SampleGraphConfig {
                    seed,
                    ensure_id,
                    sample_agents,
                    max_nodes,
                    relation_edges: edges,
                    ..Default::default()
                };
                let graph = build_sample_agent_graph(&dir, config.clone());
                let again = build_sample_agent_graph(&dir, config);

                prop_assert_eq!(&graph, &again);
                prop_assert!(graph.nodes.len() <= max_nodes);

                let ids: HashSet<u64> = graph.nodes.iter().map(|n| n.id).collect();
                let mut pairs = HashSet::new();
                for edge in &graph.edges {
                    prop_assert!(edge.source < edge.target);
                    prop_assert!(ids.contains(&edge.source) && ids.contains(&edge.target));
                    prop_assert!(edge.strength >= STRENGTH_MIN && edge.strength <= STRENGTH_MAX);
                    prop_assert!(pairs.insert(edge.pair()));
                }
            }
        }
    }
}
