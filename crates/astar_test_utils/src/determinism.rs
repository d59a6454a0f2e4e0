//! Determinism testing utilities.
//!
//! Planning results are compared across runs, across solver instances and
//! across threads. Sources of non-determinism a planner can pick up:
//!
//! - **Unstable tie-breaking**: two frontier entries with equal keys must
//!   always pop in the same order. The frontier breaks final ties by
//!   insertion sequence.
//!
//! - **Hash iteration order**: the default hasher is randomized, so no
//!   search state lives in a `HashMap`.
//!
//! - **Unseeded randomness**: grid generation only ever draws from a
//!   seeded `ChaCha8Rng`.
//!
//! - **Leftover state**: a reused solver must forget the previous
//!   episode completely.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    fn from_hashes(hashes: Vec<u64>) -> Self {
        Self {
            is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
            hashes,
        }
    }

    /// Get all unique hashes (should be 1 for a deterministic planner).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run agreed, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Planner is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run `plan` several times on fresh state and compare the hashed results.
///
/// # Example
///
/// ```ignore
/// use astar_test_utils::determinism::verify_determinism;
///
/// let result = verify_determinism(5, || find_path(&grid, start, goal, TieBreak::GreaterG));
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<T, F>(runs: usize, plan: F) -> DeterminismResult
where
    T: Hash,
    F: Fn() -> T,
{
    let hashes = (0..runs).map(|_| compute_hash(&plan())).collect();
    DeterminismResult::from_hashes(hashes)
}

/// Run `plan` on `threads` scoped threads at once and compare the results.
///
/// Catches shared state that only diverges under concurrent use.
///
/// # Panics
///
/// Panics if a worker thread panics.
pub fn verify_parallel_determinism<T, F>(threads: usize, plan: F) -> DeterminismResult
where
    T: Hash,
    F: Fn() -> T + Sync,
{
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| s.spawn(|| compute_hash(&plan())))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("planner thread panicked"))
            .collect()
    });
    DeterminismResult::from_hashes(hashes)
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
