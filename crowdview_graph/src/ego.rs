//! Ego-network construction: the neighborhood around one focal agent.

use crate::model::{derive_nodes, AgentGraph, AgentGraphEdge, EdgeKind, RelationEdgeInput};
use crate::normalize::normalize_relation_edges;
use crate::relations::{adjacency, degree_ranking, filter_connected, induced_edges, RelationOutcome};
use crate::select::pick_ids_deterministic;
use crate::synth::{synthesize_group_edges, GroupEdgeParams};
use crowdview_env::AgentDirectory;
use std::collections::{HashSet, VecDeque};

/// Upper cap on directly-picked neighbors in synthetic mode.
pub const DIRECT_NEIGHBOR_CAP: usize = 35;

/// How many direct neighbors seed a synthetic second hop.
const SECOND_HOP_SOURCES: usize = 15;

/// Second-hop picks per direct neighbor.
const SECOND_HOP_PER_NEIGHBOR: usize = 2;

/// Strength of the synthetic focus-to-neighbor follow edges.
pub const FOLLOW_STRENGTH: f64 = 0.9;

/// Strength of synthetic same-group edges in the ego view.
pub const EGO_SAME_GROUP_STRENGTH: f64 = 0.55;

/// Strength of synthetic cross-group edges in the ego view.
pub const EGO_CROSS_GROUP_STRENGTH: f64 = 0.35;

const SECOND_HOP_SEED_OFFSET: u64 = 17;
const SAME_GROUP_SEED_OFFSET: u64 = 29;
const CROSS_GROUP_SEED_OFFSET: u64 = 41;

/// Configuration for [`build_ego_agent_graph`].
#[derive(Debug, Clone)]
pub struct EgoGraphConfig {
    /// Master seed for all deterministic selection.
    pub seed: u64,

    /// The focal agent; always present in the result.
    pub focus_id: u64,

    /// Population bound: synthetic picks are drawn from `[0, sample_agents)`.
    pub sample_agents: u64,

    /// Node budget; clamped to a minimum of 2.
    pub max_nodes: usize,

    /// Raw relationship edges, if the simulation has real ones.
    pub relation_edges: Vec<RelationEdgeInput>,

    /// Restricts raw edges to known agent ids when supplied.
    pub valid_agent_ids: Option<HashSet<u64>>,
}

impl Default for EgoGraphConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            focus_id: 0,
            sample_agents: 200,
            max_nodes: 40,
            relation_edges: Vec::new(),
            valid_agent_ids: None,
        }
    }
}

/// Builds the ego network around `config.focus_id`.
///
/// Real relationship edges take precedence: if the normalized edges induce
/// a non-empty subgraph around the focus, the result contains only real
/// edges. Otherwise the neighborhood is synthesized deterministically from
/// the seed. The focus node is always retained, even when isolated.
pub fn build_ego_agent_graph<D: AgentDirectory>(dir: &D, config: EgoGraphConfig) -> AgentGraph {
    let max_nodes = config.max_nodes.max(2);

    let canonical = normalize_relation_edges(&config.relation_edges, config.valid_agent_ids.as_ref());
    if !canonical.is_empty() {
        match ego_from_relations(dir, config.focus_id, max_nodes, &canonical) {
            RelationOutcome::Induced(graph) => return graph,
            // Real edges exist globally but none connect the local
            // neighborhood; synthesize instead.
            RelationOutcome::NeedsSynthesis => {}
        }
    }

    synthetic_ego(dir, config.seed, config.focus_id, config.sample_agents, max_nodes)
}

/// Real-edge mode: BFS over strength-sorted adjacency, topped up by degree.
fn ego_from_relations<D: AgentDirectory>(
    dir: &D,
    focus_id: u64,
    max_nodes: usize,
    edges: &[AgentGraphEdge],
) -> RelationOutcome {
    let adj = adjacency(edges);

    let mut visited: HashSet<u64> = HashSet::new();
    let mut order: Vec<u64> = Vec::new();
    let mut queue: VecDeque<u64> = VecDeque::new();
    visited.insert(focus_id);
    order.push(focus_id);
    queue.push_back(focus_id);

    'bfs: while let Some(current) = queue.pop_front() {
        let Some(neighbors) = adj.get(&current) else {
            continue;
        };
        for &(next, _strength) in neighbors {
            if visited.insert(next) {
                order.push(next);
                queue.push_back(next);
                if order.len() >= max_nodes {
                    break 'bfs;
                }
            }
        }
    }

    // Disconnected graphs cannot fill the budget by traversal alone; top up
    // with the most-connected agents.
    if order.len() < max_nodes {
        for id in degree_ranking(&adj) {
            if order.len() >= max_nodes {
                break;
            }
            if visited.insert(id) {
                order.push(id);
            }
        }
    }

    let picked: HashSet<u64> = order.iter().copied().collect();
    let induced = induced_edges(edges, &picked);
    if induced.is_empty() {
        return RelationOutcome::NeedsSynthesis;
    }

    let nodes = filter_connected(derive_nodes(dir, &order), &induced, Some(focus_id));
    RelationOutcome::Induced(AgentGraph { nodes, edges: induced })
}

/// Synthetic mode: deterministic direct neighbors, a second hop, and
/// group-affinity edges.
fn synthetic_ego<D: AgentDirectory>(
    dir: &D,
    seed: u64,
    focus_id: u64,
    sample_agents: u64,
    max_nodes: usize,
) -> AgentGraph {
    let mut excluded: HashSet<u64> = HashSet::new();
    excluded.insert(focus_id);
    let mut ids: Vec<u64> = vec![focus_id];

    let direct = pick_ids_deterministic(
        dir,
        seed,
        focus_id,
        DIRECT_NEIGHBOR_CAP.min(max_nodes - 1),
        sample_agents,
        &mut excluded,
    );
    ids.extend_from_slice(&direct);

    // Second hop keeps the view from being a pure star.
    if ids.len() < max_nodes {
        for &neighbor in direct.iter().take(SECOND_HOP_SOURCES) {
            let room = max_nodes - ids.len();
            if room == 0 {
                break;
            }
            let hops = pick_ids_deterministic(
                dir,
                seed.wrapping_add(SECOND_HOP_SEED_OFFSET),
                neighbor,
                SECOND_HOP_PER_NEIGHBOR.min(room),
                sample_agents,
                &mut excluded,
            );
            ids.extend(hops);
        }
    }

    let mut edges: Vec<AgentGraphEdge> = Vec::new();
    let mut seen: HashSet<(u64, u64)> = HashSet::new();
    for &neighbor in &direct {
        let edge = AgentGraphEdge::between(focus_id, neighbor, FOLLOW_STRENGTH, EdgeKind::Follow);
        if seen.insert(edge.pair()) {
            edges.push(edge);
        }
    }

    synthesize_group_edges(
        dir,
        &ids,
        GroupEdgeParams {
            same_seed: seed.wrapping_add(SAME_GROUP_SEED_OFFSET),
            cross_seed: seed.wrapping_add(CROSS_GROUP_SEED_OFFSET),
            same_strength: EGO_SAME_GROUP_STRENGTH,
            cross_strength: EGO_CROSS_GROUP_STRENGTH,
        },
        &mut edges,
        &mut seen,
    );

    let nodes = filter_connected(derive_nodes(dir, &ids), &edges, Some(focus_id));
    AgentGraph { nodes, edges }
}
