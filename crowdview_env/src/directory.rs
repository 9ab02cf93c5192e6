//! Deterministic agent identity derivations.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Salt applied to the agent id before deriving its group key, so group
/// membership is uncorrelated with the selection hash stream.
const GROUP_SALT: u64 = 0x3c6ef372fe94f82b;

/// Golden ratio prime used to spread consecutive keys across the seed space.
const KEY_MIX: u64 = 0x9e3779b97f4a7c15;

/// Host-provided identity derivations for simulated agents.
///
/// The graph builder treats these as black-box pure functions. Every
/// implementation must be deterministic: the same input always yields the
/// same output, across calls and across processes.
pub trait AgentDirectory {
    /// Returns a uniform value in `[0, 1)` derived from `key`.
    ///
    /// This is the sole entropy source for the graph builder; it must be
    /// total over all `u64` inputs.
    fn hash01(&self, key: u64) -> f64;

    /// Returns the group key for an agent id.
    fn agent_group(&self, id: u64) -> String;

    /// Returns the display label for an agent id.
    fn agent_name(&self, id: u64) -> String;
}

/// Default deterministic directory.
///
/// Derivations follow the same recipe used for deterministic key material
/// elsewhere in the workbench: mix the key with a golden-ratio prime, seed a
/// `ChaCha8Rng`, and draw. Groups partition the population into a fixed set
/// of named cohorts.
#[derive(Debug, Clone)]
pub struct SeededDirectory {
    groups: Vec<String>,
}

impl SeededDirectory {
    /// Creates a directory with the standard five-cohort partition.
    pub fn new() -> Self {
        Self::with_groups(
            ["Group A", "Group B", "Group C", "Group D", "Group E"]
                .iter()
                .map(|g| g.to_string())
                .collect(),
        )
    }

    /// Creates a directory with a caller-supplied group partition.
    ///
    /// An empty list collapses to a single "Group A" cohort so that
    /// `agent_group` stays total.
    pub fn with_groups(groups: Vec<String>) -> Self {
        if groups.is_empty() {
            return Self {
                groups: vec!["Group A".to_string()],
            };
        }
        Self { groups }
    }

    /// Number of distinct groups this directory assigns.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Default for SeededDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentDirectory for SeededDirectory {
    fn hash01(&self, key: u64) -> f64 {
        let mixed = key.wrapping_mul(KEY_MIX);
        let mut rng = ChaCha8Rng::seed_from_u64(mixed);
        rng.gen::<f64>()
    }

    fn agent_group(&self, id: u64) -> String {
        let slot = self.hash01(id.wrapping_mul(GROUP_SALT)) * self.groups.len() as f64;
        let idx = (slot as usize).min(self.groups.len() - 1);
        self.groups[idx].clone()
    }

    fn agent_name(&self, id: u64) -> String {
        format!("Agent_{}", id)
    }
}
