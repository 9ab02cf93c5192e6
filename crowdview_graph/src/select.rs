//! Deterministic pseudo-random id selection.
//!
//! No stateful generator: every candidate is a pure function of
//! `(seed, base, attempt index)` through the host hash, so selection is
//! reentrant and reproducible from the call arguments alone.

use crowdview_env::AgentDirectory;
use std::collections::HashSet;

/// Attempt budget multiplier; guarantees termination under heavy collision.
pub const ATTEMPT_FACTOR: usize = 8;

/// Picks up to `count` distinct ids in `[0, max_exclusive)`.
///
/// Candidates already in `excluded` are skipped; accepted ids are added to
/// `excluded`, so one call never returns the same id twice and successive
/// calls sharing the set never overlap. May return fewer than `count` ids
/// when the pool is small or the attempt budget (`count * 8`) runs out;
/// callers must tolerate short results.
pub fn pick_ids_deterministic<D: AgentDirectory>(
    dir: &D,
    seed: u64,
    base: u64,
    count: usize,
    max_exclusive: u64,
    excluded: &mut HashSet<u64>,
) -> Vec<u64> {
    if max_exclusive == 0 || count == 0 {
        return Vec::new();
    }

    let mut picked = Vec::with_capacity(count);
    for i in 0..count.saturating_mul(ATTEMPT_FACTOR) {
        let key = seed
            .wrapping_add(base.wrapping_mul(1009))
            .wrapping_add((i as u64).wrapping_mul(31));
        let candidate = (dir.hash01(key) * max_exclusive as f64) as u64;
        // hash01 < 1.0, but guard against float rounding at large bounds.
        let candidate = candidate.min(max_exclusive - 1);

        if excluded.insert(candidate) {
            picked.push(candidate);
            if picked.len() == count {
                break;
            }
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowdview_env::SeededDirectory;

    #[test]
    fn test_deterministic() {
        let dir = SeededDirectory::new();

        let mut ex1 = HashSet::new();
        let mut ex2 = HashSet::new();
        let a = pick_ids_deterministic(&dir, 42, 7, 10, 100, &mut ex1);
        let b = pick_ids_deterministic(&dir, 42, 7, 10, 100, &mut ex2);

        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn test_distinct_within_call() {
        let dir = SeededDirectory::new();
        let mut excluded = HashSet::new();
        let picked = pick_ids_deterministic(&dir, 1, 0, 20, 1000, &mut excluded);

        let unique: HashSet<u64> = picked.iter().copied().collect();
        assert_eq!(unique.len(), picked.len());
    }

    #[test]
    fn test_bounds_respected() {
        let dir = SeededDirectory::new();
        let mut excluded = HashSet::new();
        let picked = pick_ids_deterministic(&dir, 9, 3, 50, 64, &mut excluded);

        assert!(picked.iter().all(|&id| id < 64));
    }

    #[test]
    fn test_zero_bound_returns_empty() {
        let dir = SeededDirectory::new();
        let mut excluded = HashSet::new();
        assert!(pick_ids_deterministic(&dir, 1, 1, 5, 0, &mut excluded).is_empty());
    }

    #[test]
    fn test_short_result_on_small_pool() {
        let dir = SeededDirectory::new();
        let mut excluded = HashSet::new();
        let picked = pick_ids_deterministic(&dir, 1, 1, 10, 3, &mut excluded);

        assert!(picked.len() <= 3);
        assert!(picked.iter().all(|&id| id < 3));
    }

    #[test]
    fn test_excluded_ids_skipped() {
        let dir = SeededDirectory::new();
        let mut excluded: HashSet<u64> = [0, 1].into_iter().collect();
        let picked = pick_ids_deterministic(&dir, 5, 2, 5, 3, &mut excluded);

        // Only id 2 remains in the pool.
        assert_eq!(picked, vec![2]);
        assert!(excluded.contains(&0) && excluded.contains(&1));
    }

    #[test]
    fn test_accepted_ids_marked_excluded() {
        let dir = SeededDirectory::new();
        let mut excluded = HashSet::new();
        let first = pick_ids_deterministic(&dir, 3, 0, 5, 100, &mut excluded);
        let second = pick_ids_deterministic(&dir, 4, 1, 5, 100, &mut excluded);

        for id in &second {
            assert!(!first.contains(id));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let dir = SeededDirectory::new();

        let mut ex1 = HashSet::new();
        let mut ex2 = HashSet::new();
        let a = pick_ids_deterministic(&dir, 1, 0, 10, 10_000, &mut ex1);
        let b = pick_ids_deterministic(&dir, 2, 0, 10, 10_000, &mut ex2);

        assert_ne!(a, b);
    }
}
