//! Grid-based A* search for a single start/goal pair.
//!
//! Movement is 4-connected with unit cost and the heuristic is Manhattan
//! distance, so the first time the goal is popped its route is shortest.
//! Output is fully deterministic: neighbor order is fixed and the frontier
//! breaks every tie.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::frontier::{Frontier, TieBreak};
use crate::grid::{Coord, Grid};
use crate::heuristic::manhattan;
use crate::node::{NodeStatus, NodeStore};
use crate::path::Path;

/// Counters for one or more search episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Cells closed.
    pub expansions: u64,
    /// Frontier insertions, re-insertions included.
    pub pushes: u64,
    /// Popped entries skipped because their cell was already closed.
    pub stale_pops: u64,
    /// Largest frontier size seen.
    pub frontier_high_water: usize,
}

impl SearchStats {
    /// Fold another episode's counters into this one.
    pub fn absorb(&mut self, other: &Self) {
        self.expansions += other.expansions;
        self.pushes += other.pushes;
        self.stale_pops += other.stale_pops;
        self.frontier_high_water = self.frontier_high_water.max(other.frontier_high_water);
    }
}

/// Result of one search episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Shortest path, or `None` when the goal cannot be reached.
    pub path: Option<Path>,
    /// Episode counters.
    pub stats: SearchStats,
}

/// Reusable A* solver.
///
/// Owns its node arena and frontier; both are reset at the start of every
/// call, so one solver can serve any number of independent episodes.
#[derive(Debug, Clone)]
pub struct AStar {
    nodes: NodeStore,
    frontier: Frontier,
}

impl AStar {
    /// Create a solver with the given tie-break policy.
    #[must_use]
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            nodes: NodeStore::new(),
            frontier: Frontier::new(tie_break),
        }
    }

    /// The configured tie-break policy.
    #[must_use]
    pub const fn tie_break(&self) -> TieBreak {
        self.frontier.tie_break()
    }

    /// Node state left by the most recent episode.
    #[must_use]
    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    /// Find a shortest path from `start` to `goal`.
    ///
    /// Returns `Ok(None)` if either endpoint is blocked or no route exists.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::OutOfRange`](crate::error::PlanError::OutOfRange)
    /// if either endpoint is outside the grid.
    pub fn solve(&mut self, grid: &Grid, start: Coord, goal: Coord) -> Result<Option<Path>> {
        Ok(self.search(grid, start, goal)?.path)
    }

    /// Like [`AStar::solve`], also reporting episode counters.
    pub fn search(&mut self, grid: &Grid, start: Coord, goal: Coord) -> Result<SearchOutcome> {
        let start_id = grid.checked_id(start)?;
        let goal_id = grid.checked_id(goal)?;

        self.nodes.reset(grid.cell_count());
        self.frontier.clear();
        let mut stats = SearchStats::default();

        if !grid.reachable_id(start_id) || !grid.reachable_id(goal_id) {
            debug!(%start, %goal, "A* endpoint blocked");
            return Ok(SearchOutcome { path: None, stats });
        }

        let start_h = manhattan(start, goal);
        self.nodes.open_start(start_id, start_h);
        self.frontier.push(start_id, start_h, 0);
        stats.pushes += 1;

        let mut found = None;
        while let Some(id) = self.frontier.pop() {
            // Superseded duplicate from a lazy decrease-key
            if self.nodes.is_closed(id) {
                stats.stale_pops += 1;
                trace!(cell = %grid.coord_of(id), "skipping stale frontier entry");
                continue;
            }

            self.nodes.close(id);
            stats.expansions += 1;

            if id == goal_id {
                found = Some(self.reconstruct_path(grid, goal_id));
                break;
            }

            let current = grid.coord_of(id);
            let tentative_g = self.nodes.get(id).g + 1;

            for neighbor in grid.neighbors(current) {
                let neighbor_id = grid.cell_id(neighbor);
                if !grid.reachable_id(neighbor_id) {
                    continue;
                }

                // Equal cost does not re-parent an open cell
                let improves = match self.nodes.status(neighbor_id) {
                    NodeStatus::Unvisited => true,
                    NodeStatus::Open => self.nodes.get(neighbor_id).g > tentative_g,
                    NodeStatus::Closed => false,
                };
                if !improves {
                    continue;
                }

                let h = manhattan(neighbor, goal);
                self.nodes.relax(neighbor_id, id, tentative_g, h);
                self.frontier.push(neighbor_id, tentative_g + h, tentative_g);
                stats.pushes += 1;
            }
        }

        stats.frontier_high_water = self.frontier.high_water();
        debug!(
            %start,
            %goal,
            tie_break = ?self.tie_break(),
            expansions = stats.expansions,
            found = found.is_some(),
            "A* episode finished"
        );

        Ok(SearchOutcome { path: found, stats })
    }

    /// Follow parent links back from `goal_id`.
    fn reconstruct_path(&self, grid: &Grid, goal_id: usize) -> Path {
        self.nodes
            .chain_to(goal_id)
            .into_iter()
            .map(|id| grid.coord_of(id))
            .collect::<Vec<_>>()
            .into()
    }
}

impl Default for AStar {
    fn default() -> Self {
        Self::new(TieBreak::default())
    }
}

/// One-shot convenience wrapper around [`AStar::solve`].
pub fn find_path(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    tie_break: TieBreak,
) -> Result<Option<Path>> {
    AStar::new(tie_break).solve(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;

    fn c(x: u32, y: u32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_open_grid_path_length() {
        let grid = Grid::new(5, 5);
        for tie_break in [TieBreak::GreaterG, TieBreak::LesserG] {
            let path = find_path(&grid, c(0, 0), c(4, 4), tie_break)
                .unwrap()
                .unwrap();
            assert_eq!(path.len(), 9);
            assert_eq!(path.moves(), 8);
            assert_eq!(path.first(), Some(c(0, 0)));
            assert_eq!(path.last(), Some(c(4, 4)));
            assert!(path.is_valid_on(&grid));
        }
    }

    #[test]
    fn test_greater_g_open_grid_route() {
        // +x is enumerated first and deeper entries win ties, so the
        // search runs along x before turning
        let grid = Grid::new(5, 5);
        let path = find_path(&grid, c(0, 0), c(4, 4), TieBreak::GreaterG)
            .unwrap()
            .unwrap();
        let expected: Vec<Coord> = [
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
            (4, 1),
            (4, 2),
            (4, 3),
            (4, 4),
        ]
        .into_iter()
        .map(Coord::from)
        .collect();
        assert_eq!(path.cells(), expected.as_slice());
    }

    #[test]
    fn test_greater_g_expands_fewer_on_open_grid() {
        let grid = Grid::new(9, 9);
        let mut greater = AStar::new(TieBreak::GreaterG);
        let mut lesser = AStar::new(TieBreak::LesserG);

        let g = greater.search(&grid, c(0, 0), c(8, 8)).unwrap();
        let l = lesser.search(&grid, c(0, 0), c(8, 8)).unwrap();

        assert_eq!(g.path.as_ref().map(Path::len), l.path.as_ref().map(Path::len));
        assert_eq!(g.stats.expansions, 17, "greater g should walk straight to the goal");
        assert!(l.stats.expansions > g.stats.expansions);
    }

    #[test]
    fn test_path_around_wall() {
        let mut grid = Grid::new(5, 5);
        for y in 0..4 {
            grid.set_blocked(c(2, y), true).unwrap();
        }

        let path = find_path(&grid, c(0, 0), c(4, 0), TieBreak::GreaterG)
            .unwrap()
            .unwrap();
        assert!(path.is_valid_on(&grid));
        assert!(path.cells().contains(&c(2, 4)), "must pass through the gap");
        assert_eq!(path.moves(), 12);
    }

    #[test]
    fn test_no_path_exists() {
        let mut grid = Grid::new(5, 5);
        for y in 0..5 {
            grid.set_blocked(c(2, y), true).unwrap();
        }

        let mut astar = AStar::new(TieBreak::LesserG);
        let outcome = astar.search(&grid, c(0, 0), c(4, 4)).unwrap();
        assert_eq!(outcome.path, None);
        assert_eq!(outcome.stats.expansions, 10, "whole left side is explored");
    }

    #[test]
    fn test_blocked_start_or_goal() {
        let mut grid = Grid::new(5, 5);
        grid.set_blocked(c(0, 0), true).unwrap();
        assert_eq!(find_path(&grid, c(0, 0), c(4, 4), TieBreak::GreaterG), Ok(None));
        assert_eq!(find_path(&grid, c(4, 4), c(0, 0), TieBreak::GreaterG), Ok(None));
    }

    #[test]
    fn test_out_of_range_endpoint() {
        let grid = Grid::new(5, 5);
        let err = find_path(&grid, c(0, 0), c(5, 0), TieBreak::GreaterG).unwrap_err();
        assert!(matches!(err, PlanError::OutOfRange { x: 5, y: 0, .. }));
    }

    #[test]
    fn test_path_to_same_cell() {
        let grid = Grid::new(5, 5);
        let path = find_path(&grid, c(2, 2), c(2, 2), TieBreak::LesserG)
            .unwrap()
            .unwrap();
        assert_eq!(path.cells(), &[c(2, 2)]);
    }

    #[test]
    fn test_determinism() {
        let mut grid = Grid::new(20, 20);
        for i in 5..15 {
            grid.set_blocked(c(10, i), true).unwrap();
            grid.set_blocked(c(i, 4), true).unwrap();
        }

        let mut astar = AStar::new(TieBreak::GreaterG);
        let path1 = astar.solve(&grid, c(0, 10), c(19, 10)).unwrap();
        let path2 = astar.solve(&grid, c(0, 10), c(19, 10)).unwrap();
        let path3 = find_path(&grid, c(0, 10), c(19, 10), TieBreak::GreaterG).unwrap();

        assert!(path1.is_some());
        assert_eq!(path1, path2);
        assert_eq!(path2, path3);
    }

    #[test]
    fn test_closed_cells_have_parents_except_start() {
        let mut grid = Grid::new(6, 6);
        grid.set_blocked(c(3, 3), true).unwrap();
        let mut astar = AStar::new(TieBreak::LesserG);
        astar.solve(&grid, c(0, 0), c(5, 5)).unwrap().unwrap();

        let nodes = astar.nodes();
        for id in 0..grid.cell_count() {
            let record = nodes.get(id);
            if !grid.reachable_id(id) {
                assert_eq!(record.status, NodeStatus::Unvisited);
                assert_eq!(record.parent, None);
            }
            if record.status != NodeStatus::Unvisited {
                assert_eq!(record.f, record.g + record.h);
                assert_eq!(record.parent.is_none(), id == 0);
            }
        }
    }

    #[test]
    fn test_episodes_are_independent() {
        let mut grid = Grid::new(6, 6);
        let mut astar = AStar::new(TieBreak::GreaterG);
        let before = astar.solve(&grid, c(0, 0), c(5, 5)).unwrap();

        grid.set_blocked(c(3, 0), true).unwrap();
        let _ = astar.solve(&grid, c(0, 0), c(5, 5)).unwrap();

        grid.set_blocked(c(3, 0), false).unwrap();
        let after = astar.solve(&grid, c(0, 0), c(5, 5)).unwrap();
        assert_eq!(before, after);
    }
}
