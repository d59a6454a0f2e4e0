//! Per-cell search state for one planning episode.
//!
//! Records live in a flat arena indexed by cell id. Parents are stored as
//! ids, never as references, so the arena is the only owner of node data.

/// Membership of a cell in the current episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeStatus {
    /// Not touched yet.
    #[default]
    Unvisited,
    /// In the frontier (possibly more than once).
    Open,
    /// Expanded; g and parent are final.
    Closed,
}

/// Search bookkeeping for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeRecord {
    /// Best known cost from the episode start.
    pub g: u32,
    /// Heuristic estimate to the goal, cached on first relaxation.
    pub h: u32,
    /// `g + h`.
    pub f: u32,
    /// Predecessor on the best known route.
    pub parent: Option<usize>,
    /// Open/closed membership.
    pub status: NodeStatus,
}

/// Arena of [`NodeRecord`]s, one per grid cell.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    records: Vec<NodeRecord>,
}

impl NodeStore {
    /// Create an empty store; sized on the first [`NodeStore::reset`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every record to its unvisited state for a grid of
    /// `cell_count` cells. The allocation is reused across episodes.
    pub fn reset(&mut self, cell_count: usize) {
        self.records.clear();
        self.records.resize(cell_count, NodeRecord::default());
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is unsized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for a cell id.
    #[inline]
    #[must_use]
    pub fn get(&self, id: usize) -> &NodeRecord {
        &self.records[id]
    }

    /// Membership of a cell id.
    #[inline]
    #[must_use]
    pub fn status(&self, id: usize) -> NodeStatus {
        self.records[id].status
    }

    /// Whether a cell has been expanded this episode.
    #[inline]
    #[must_use]
    pub fn is_closed(&self, id: usize) -> bool {
        self.records[id].status == NodeStatus::Closed
    }

    /// Seed the episode start: `g = 0`, `f = h`, no parent.
    pub fn open_start(&mut self, id: usize, h: u32) {
        self.records[id] = NodeRecord {
            g: 0,
            h,
            f: h,
            parent: None,
            status: NodeStatus::Open,
        };
    }

    /// Record a better route to `id` through `parent`.
    pub fn relax(&mut self, id: usize, parent: usize, g: u32, h: u32) {
        let record = &mut self.records[id];
        debug_assert_ne!(record.status, NodeStatus::Closed, "closed node relaxed");
        record.g = g;
        record.h = h;
        record.f = g + h;
        record.parent = Some(parent);
        record.status = NodeStatus::Open;
    }

    /// Finalize a cell.
    pub fn close(&mut self, id: usize) {
        self.records[id].status = NodeStatus::Closed;
    }

    /// Cell ids from the root of `id`'s parent chain to `id`.
    #[must_use]
    pub fn chain_to(&self, id: usize) -> Vec<usize> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.records[current].parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Number of closed cells.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == NodeStatus::Closed)
            .count()
    }
}
