//! Open set: a min-priority queue keyed on `(f, tie-break(g), insertion)`.
//!
//! Decrease-key is lazy. A cell whose cost improves is pushed again and the
//! older entry stays behind; callers skip entries for cells that are already
//! closed when they pop.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Ordering between frontier entries that share the same `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Pop the entry with the larger `g` first (deeper, closer to the goal).
    #[default]
    GreaterG,
    /// Pop the entry with the smaller `g` first (shallower, closer to the start).
    LesserG,
}

impl TieBreak {
    /// Map `g` to a rank where smaller pops first.
    #[inline]
    #[must_use]
    pub const fn rank(self, g: u32) -> u32 {
        match self {
            Self::GreaterG => u32::MAX - g,
            Self::LesserG => g,
        }
    }
}

/// Frontier ordering key. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierKey {
    f: u32,
    g_rank: u32,
    seq: u64,
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .cmp(&other.f)
            .then(self.g_rank.cmp(&other.g_rank))
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A heap entry. `BinaryHeap` is a max-heap, hence the `Reverse` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    id: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier over cell ids.
#[derive(Debug, Clone)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    tie_break: TieBreak,
    next_seq: u64,
    high_water: usize,
}

impl Frontier {
    /// Create an empty frontier with the given tie-break policy.
    #[must_use]
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            tie_break,
            next_seq: 0,
            high_water: 0,
        }
    }

    /// The configured tie-break policy.
    #[must_use]
    pub const fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Drop all entries and counters, keeping the allocation.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
        self.high_water = 0;
    }

    /// Insert a cell with its current `f` and `g`.
    pub fn push(&mut self, id: usize, f: u32, g: u32) {
        let key = FrontierKey {
            f,
            g_rank: self.tie_break.rank(g),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            id,
        });
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Remove and return the best cell id.
    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|e| e.id)
    }

    /// Entries currently queued, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size reached since the last clear.
    #[must_use]
    pub const fn high_water(&self) -> usize {
        self.high_water
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_f_pops_first() {
        let mut frontier = Frontier::new(TieBreak::GreaterG);
        frontier.push(0, 10, 0);
        frontier.push(1, 5, 0);
        frontier.push(2, 15, 0);

        assert_eq!(frontier.pop(), Some(1));
        assert_eq!(frontier.pop(), Some(0));
        assert_eq!(frontier.pop(), Some(2));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_greater_g_wins_ties() {
        let mut frontier = Frontier::new(TieBreak::GreaterG);
        frontier.push(0, 8, 2);
        frontier.push(1, 8, 6);
        frontier.push(2, 8, 4);

        assert_eq!(frontier.pop(), Some(1));
        assert_eq!(frontier.pop(), Some(2));
        assert_eq!(frontier.pop(), Some(0));
    }

    #[test]
    fn test_lesser_g_wins_ties() {
        let mut frontier = Frontier::new(TieBreak::LesserG);
        frontier.push(0, 8, 2);
        frontier.push(1, 8, 6);
        frontier.push(2, 8, 4);

        assert_eq!(frontier.pop(), Some(0));
        assert_eq!(frontier.pop(), Some(2));
        assert_eq!(frontier.pop(), Some(1));
    }

    #[test]
    fn test_full_ties_pop_in_insertion_order() {
        for tie_break in [TieBreak::GreaterG, TieBreak::LesserG] {
            let mut frontier = Frontier::new(tie_break);
            frontier.push(7, 4, 1);
            frontier.push(3, 4, 1);
            frontier.push(9, 4, 1);
            assert_eq!(frontier.pop(), Some(7));
            assert_eq!(frontier.pop(), Some(3));
            assert_eq!(frontier.pop(), Some(9));
        }
    }

    #[test]
    fn test_duplicate_entries_are_kept() {
        let mut frontier = Frontier::new(TieBreak::GreaterG);
        frontier.push(4, 9, 5);
        frontier.push(4, 7, 3);
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop(), Some(4));
        assert_eq!(frontier.pop(), Some(4));
    }

    #[test]
    fn test_high_water_and_clear() {
        let mut frontier = Frontier::new(TieBreak::LesserG);
        frontier.push(0, 1, 0);
        frontier.push(1, 2, 0);
        frontier.push(2, 3, 0);
        let _ = frontier.pop();
        assert_eq!(frontier.high_water(), 3, "high water should not drop on pop");

        frontier.clear();
        assert!(frontier.is_empty());
        assert_eq!(frontier.high_water(), 0);
        assert_eq!(frontier.tie_break(), TieBreak::LesserG);
    }
}
