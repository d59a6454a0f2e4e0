//! Repeated A*: plan, walk, discover, replan.
//!
//! The agent plans on its own knowledge of the grid and then executes the
//! plan one cell at a time against the true grid. When the next cell turns
//! out to be blocked, the agent records it, stays on the last good cell and
//! plans again from there. Every episode is a full A* search from scratch.
//!
//! Each replan is preceded by at least one newly discovered blocked cell, so
//! a run makes at most `blocked cells + 1` searches.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::astar::{AStar, SearchStats};
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::grid::{Coord, Grid};
use crate::path::Path;

/// Which endpoint the search starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Search from origin towards destination.
    #[default]
    Forward,
    /// Search from destination towards origin.
    Backward,
}

impl Direction {
    /// `(search start, search goal)` for this direction.
    #[must_use]
    pub const fn endpoints(self, origin: Coord, destination: Coord) -> (Coord, Coord) {
        match self {
            Self::Forward => (origin, destination),
            Self::Backward => (destination, origin),
        }
    }
}

/// What the agent believes about cells it has not observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Knowledge {
    /// Unobserved cells are assumed open.
    #[default]
    FreeSpace,
    /// The agent knows the true grid up front; no discovery happens.
    Full,
}

/// When blocked cells are observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensing {
    /// Only when trying to step onto the cell.
    #[default]
    OnStep,
    /// Also every 4-neighbor of each cell the agent stands on.
    Adjacent,
}

/// Planner state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatedState {
    /// About to run the first search.
    Planning,
    /// Walking the current plan.
    Executing,
    /// A blocked cell cut the plan; searching again.
    Replanning,
    /// The search goal was reached.
    Done,
    /// No route exists given what the agent knows.
    Unreachable,
}

impl RepeatedState {
    /// Whether the run has finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Unreachable)
    }
}

/// Full report of a repeated run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedOutcome {
    /// Terminal state, `Done` or `Unreachable`.
    pub state: RepeatedState,
    /// Direction the run used.
    pub direction: Direction,
    /// The last episode's plan, from the cell where it was made to the
    /// search goal. Earlier walked segments are not included; see
    /// [`RepeatedOutcome::trajectory`]. `None` unless `Done`.
    pub final_path: Option<Path>,
    /// Cells the agent occupied, in order, starting at the search start.
    pub trajectory: Path,
    /// Number of A* searches run.
    pub episodes: u32,
    /// Blocked cells learned during the run, in discovery order.
    pub discovered: Vec<Coord>,
    /// Counters summed over every episode.
    pub stats: SearchStats,
}

impl RepeatedOutcome {
    /// Whether the search goal was reached.
    #[must_use]
    pub fn reached(&self) -> bool {
        self.state == RepeatedState::Done
    }

    /// Number of times the agent had to plan again.
    #[must_use]
    pub fn replans(&self) -> u32 {
        self.episodes.saturating_sub(1)
    }
}

/// Repeated A* planner.
#[derive(Debug, Clone)]
pub struct RepeatedPlanner {
    config: PlannerConfig,
    astar: AStar,
}

impl RepeatedPlanner {
    /// Create a planner.
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            astar: AStar::new(config.tie_break),
            config,
        }
    }

    /// The planner configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Run to completion and return the last episode's path.
    ///
    /// The returned path starts where the final plan was made, which is
    /// not the origin when the run replanned. Use
    /// [`RepeatedPlanner::execute`] for the walked trajectory.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::OutOfRange`](crate::error::PlanError::OutOfRange)
    /// if an endpoint is outside the grid.
    pub fn run(&mut self, grid: &Grid, origin: Coord, destination: Coord) -> Result<Option<Path>> {
        Ok(self.execute(grid, origin, destination)?.final_path)
    }

    /// Run to completion and report everything that happened.
    pub fn execute(
        &mut self,
        grid: &Grid,
        origin: Coord,
        destination: Coord,
    ) -> Result<RepeatedOutcome> {
        grid.checked_id(origin)?;
        grid.checked_id(destination)?;

        let direction = self.config.direction;
        let (mut search_start, search_goal) = direction.endpoints(origin, destination);

        let mut knowledge = match self.config.knowledge {
            Knowledge::FreeSpace => Grid::new(grid.width(), grid.height()),
            Knowledge::Full => grid.clone(),
        };
        let mut discovered = Vec::new();
        let mut trajectory = vec![search_start];
        let mut stats = SearchStats::default();
        let mut episodes = 0u32;
        let mut plan: Option<Path> = None;

        let start_blocked = observe(grid, &mut knowledge, search_start, &mut discovered);
        if self.config.sensing == Sensing::Adjacent {
            sense_around(grid, &mut knowledge, search_start, &mut discovered);
        }

        let mut state = if start_blocked {
            RepeatedState::Unreachable
        } else if search_start == search_goal {
            plan = Some(Path::new(vec![search_goal]));
            RepeatedState::Done
        } else {
            RepeatedState::Planning
        };

        while !state.is_terminal() {
            state = match state {
                RepeatedState::Planning | RepeatedState::Replanning => {
                    episodes += 1;
                    debug!(episode = episodes, from = %search_start, to = %search_goal, "planning");
                    let outcome = self.astar.search(&knowledge, search_start, search_goal)?;
                    stats.absorb(&outcome.stats);
                    plan = outcome.path;
                    if plan.is_some() {
                        RepeatedState::Executing
                    } else {
                        RepeatedState::Unreachable
                    }
                }
                RepeatedState::Executing => {
                    let Some(current) = plan.as_ref() else {
                        break;
                    };
                    let cut = self.walk(
                        grid,
                        &mut knowledge,
                        current,
                        &mut search_start,
                        &mut trajectory,
                        &mut discovered,
                    );
                    if cut {
                        RepeatedState::Replanning
                    } else {
                        debug_assert_eq!(search_start, search_goal);
                        RepeatedState::Done
                    }
                }
                RepeatedState::Done | RepeatedState::Unreachable => state,
            };
        }

        let final_path = if state == RepeatedState::Done {
            plan
        } else {
            None
        };

        info!(
            ?direction,
            episodes,
            discovered = discovered.len(),
            reached = state == RepeatedState::Done,
            "repeated A* run finished"
        );

        Ok(RepeatedOutcome {
            state,
            direction,
            final_path,
            trajectory: trajectory.into(),
            episodes,
            discovered,
            stats,
        })
    }

    /// Walk `plan` from its second cell. Returns `true` if a blocked cell
    /// cut the walk short.
    fn walk(
        &self,
        grid: &Grid,
        knowledge: &mut Grid,
        plan: &Path,
        position: &mut Coord,
        trajectory: &mut Vec<Coord>,
        discovered: &mut Vec<Coord>,
    ) -> bool {
        let cells = plan.cells();
        for (i, &next) in cells.iter().enumerate().skip(1) {
            if observe(grid, knowledge, next, discovered) {
                debug!(at = %position, blocked = %next, "plan cut by blocked cell");
                return true;
            }

            *position = next;
            trajectory.push(next);

            if self.config.sensing == Sensing::Adjacent {
                sense_around(grid, knowledge, next, discovered);
                if let Some(&ahead) = cells.get(i + 1) {
                    if !knowledge.reachable_id(knowledge.cell_id(ahead)) {
                        debug!(at = %position, blocked = %ahead, "plan cut by sensed cell");
                        return true;
                    }
                }
            }
        }
        false
    }
}

impl Default for RepeatedPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

/// Observe every 4-neighbor of `cell`.
fn sense_around(truth: &Grid, knowledge: &mut Grid, cell: Coord, discovered: &mut Vec<Coord>) {
    for neighbor in truth.neighbors(cell) {
        observe(truth, knowledge, neighbor, discovered);
    }
}

/// Copy the true status of an in-bounds `cell` into `knowledge`.
/// Returns whether the cell is blocked.
fn observe(truth: &Grid, knowledge: &mut Grid, cell: Coord, discovered: &mut Vec<Coord>) -> bool {
    let id = truth.cell_id(cell);
    if truth.reachable_id(id) {
        return false;
    }
    if knowledge.reachable_id(id) {
        knowledge.block_id(id);
        discovered.push(cell);
        debug!(%cell, "discovered blocked cell");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::TieBreak;

    fn c(x: u32, y: u32) -> Coord {
        Coord::new(x, y)
    }

    fn corridor_with_block() -> Grid {
        // Two cells wide; the direct route along y = 0 is cut at (2, 0)
        let mut grid = Grid::new(5, 2);
        grid.set_blocked(c(2, 0), true).unwrap();
        grid
    }

    fn config(direction: Direction, knowledge: Knowledge, sensing: Sensing) -> PlannerConfig {
        PlannerConfig {
            tie_break: TieBreak::GreaterG,
            direction,
            knowledge,
            sensing,
        }
    }

    #[test]
    fn test_direction_endpoints() {
        assert_eq!(Direction::Forward.endpoints(c(0, 0), c(3, 3)), (c(0, 0), c(3, 3)));
        assert_eq!(Direction::Backward.endpoints(c(0, 0), c(3, 3)), (c(3, 3), c(0, 0)));
    }

    #[test]
    fn test_open_grid_needs_one_episode() {
        let grid = Grid::new(5, 5);
        let mut planner = RepeatedPlanner::default();
        let outcome = planner.execute(&grid, c(0, 0), c(4, 4)).unwrap();

        assert_eq!(outcome.state, RepeatedState::Done);
        assert_eq!(outcome.episodes, 1);
        assert!(outcome.discovered.is_empty());
        assert_eq!(outcome.trajectory.len(), 9);
        assert_eq!(outcome.final_path.as_ref(), Some(&outcome.trajectory));
    }

    #[test]
    fn test_discovery_triggers_replan() {
        let grid = corridor_with_block();
        let mut planner =
            RepeatedPlanner::new(config(Direction::Forward, Knowledge::FreeSpace, Sensing::OnStep));
        let outcome = planner.execute(&grid, c(0, 0), c(4, 0)).unwrap();

        assert!(outcome.reached());
        assert_eq!(outcome.episodes, 2);
        assert_eq!(outcome.replans(), 1);
        assert_eq!(outcome.discovered, vec![c(2, 0)]);

        // Walked (0,0) -> (1,0), then around the block
        assert_eq!(outcome.trajectory.moves(), 6);
        assert!(outcome.trajectory.is_valid_on(&grid));
        assert_eq!(outcome.trajectory.first(), Some(c(0, 0)));
        assert_eq!(outcome.trajectory.last(), Some(c(4, 0)));

        // The final plan only covers the last episode
        let final_path = outcome.final_path.unwrap();
        assert_eq!(final_path.first(), Some(c(1, 0)));
        assert_eq!(final_path.moves(), 5);
    }

    #[test]
    fn test_run_returns_last_episode_path() {
        let grid = corridor_with_block();
        let mut planner = RepeatedPlanner::default();
        let path = planner.run(&grid, c(0, 0), c(4, 0)).unwrap().unwrap();
        assert_eq!(path.first(), Some(c(1, 0)));
        assert_eq!(path.last(), Some(c(4, 0)));
        assert!(path.is_valid_on(&grid));
    }

    #[test]
    fn test_backward_run_walks_from_destination() {
        let grid = corridor_with_block();
        let mut planner =
            RepeatedPlanner::new(config(Direction::Backward, Knowledge::FreeSpace, Sensing::OnStep));
        let outcome = planner.execute(&grid, c(0, 0), c(4, 0)).unwrap();

        assert!(outcome.reached());
        assert_eq!(outcome.episodes, 2);
        assert_eq!(outcome.trajectory.first(), Some(c(4, 0)));
        assert_eq!(outcome.trajectory.last(), Some(c(0, 0)));
        assert_eq!(outcome.trajectory.moves(), 6);
    }

    #[test]
    fn test_full_knowledge_plans_once() {
        let grid = corridor_with_block();
        let mut planner =
            RepeatedPlanner::new(config(Direction::Forward, Knowledge::Full, Sensing::OnStep));
        let outcome = planner.execute(&grid, c(0, 0), c(4, 0)).unwrap();

        assert_eq!(outcome.episodes, 1);
        assert!(outcome.discovered.is_empty());
        assert_eq!(outcome.trajectory.moves(), 6);
        assert_eq!(outcome.final_path.as_ref(), Some(&outcome.trajectory));
    }

    #[test]
    fn test_wall_is_unreachable() {
        let mut grid = Grid::new(3, 3);
        for y in 0..3 {
            grid.set_blocked(c(1, y), true).unwrap();
        }
        let mut planner = RepeatedPlanner::default();
        let outcome = planner.execute(&grid, c(0, 0), c(2, 2)).unwrap();

        assert_eq!(outcome.state, RepeatedState::Unreachable);
        assert_eq!(outcome.final_path, None);
        assert_eq!(outcome.episodes, 4, "one replan per wall cell, then failure");
        let mut found = outcome.discovered.clone();
        found.sort();
        assert_eq!(found, vec![c(1, 0), c(1, 1), c(1, 2)]);
        assert!(outcome.trajectory.iter().all(|cell| cell.x == 0));

        assert_eq!(planner.run(&grid, c(0, 0), c(2, 2)), Ok(None));
    }

    #[test]
    fn test_blocked_origin() {
        let mut grid = Grid::new(3, 3);
        grid.set_blocked(c(0, 0), true).unwrap();
        let mut planner = RepeatedPlanner::default();
        let outcome = planner.execute(&grid, c(0, 0), c(2, 2)).unwrap();
        assert_eq!(outcome.state, RepeatedState::Unreachable);
        assert_eq!(outcome.episodes, 0);
    }

    #[test]
    fn test_same_start_and_goal() {
        let grid = Grid::new(3, 3);
        let mut planner = RepeatedPlanner::default();
        let outcome = planner.execute(&grid, c(1, 1), c(1, 1)).unwrap();
        assert!(outcome.reached());
        assert_eq!(outcome.episodes, 0);
        assert_eq!(outcome.final_path, Some(Path::new(vec![c(1, 1)])));
    }

    #[test]
    fn test_adjacent_sensing_sees_side_cells() {
        let mut grid = Grid::new(5, 2);
        grid.set_blocked(c(1, 1), true).unwrap();

        let mut on_step =
            RepeatedPlanner::new(config(Direction::Forward, Knowledge::FreeSpace, Sensing::OnStep));
        let outcome = on_step.execute(&grid, c(0, 0), c(4, 0)).unwrap();
        assert!(outcome.discovered.is_empty());

        let mut adjacent =
            RepeatedPlanner::new(config(Direction::Forward, Knowledge::FreeSpace, Sensing::Adjacent));
        let outcome = adjacent.execute(&grid, c(0, 0), c(4, 0)).unwrap();
        assert_eq!(outcome.discovered, vec![c(1, 1)]);
        assert_eq!(outcome.episodes, 1, "side cell is not on the plan");
    }

    #[test]
    fn test_adjacent_sensing_stops_before_block() {
        let grid = corridor_with_block();
        let mut planner =
            RepeatedPlanner::new(config(Direction::Forward, Knowledge::FreeSpace, Sensing::Adjacent));
        let outcome = planner.execute(&grid, c(0, 0), c(4, 0)).unwrap();

        assert!(outcome.reached());
        assert_eq!(outcome.episodes, 2);
        assert!(outcome.trajectory.is_valid_on(&grid));
        assert_eq!(outcome.trajectory.moves(), 6);
    }

    #[test]
    fn test_out_of_range_endpoint() {
        let grid = Grid::new(3, 3);
        let mut planner = RepeatedPlanner::default();
        assert!(planner.execute(&grid, c(0, 0), c(3, 0)).is_err());
    }
}
