//! Batch comparison of forward and backward repeated A*.
//!
//! Runs both directions on every grid in parallel using rayon and
//! records per-run counters plus wall-clock solve time.

use std::path::Path;
use std::time::Instant;

use astar_core::config::PlannerConfig;
use astar_core::grid::Grid;
use astar_core::repeated::{Direction, RepeatedOutcome, RepeatedPlanner};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Configuration for a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Planner settings shared by both directions. The direction field
    /// is overridden per run.
    pub planner: PlannerConfig,
    /// Worker threads (0 = use rayon default).
    pub parallel: usize,
}

impl BatchConfig {
    /// Set the planner settings.
    pub fn with_planner(mut self, planner: PlannerConfig) -> Self {
        self.planner = planner;
        self
    }

    /// Set the worker thread count.
    pub fn with_parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Counters from one repeated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Whether the search goal was reached.
    pub reached: bool,
    /// A* searches run.
    pub episodes: u32,
    /// Moves the agent actually made.
    pub trajectory_moves: usize,
    /// Moves in the last episode's path.
    pub final_path_moves: Option<usize>,
    /// Blocked cells learned.
    pub discovered: usize,
    /// Cells expanded over all episodes.
    pub expansions: u64,
    /// Solve time in seconds.
    pub seconds: f64,
}

impl RunSummary {
    fn from_outcome(outcome: &RepeatedOutcome, seconds: f64) -> Self {
        Self {
            reached: outcome.reached(),
            episodes: outcome.episodes,
            trajectory_moves: outcome.trajectory.moves(),
            final_path_moves: outcome.final_path.as_ref().map(|p| p.moves()),
            discovered: outcome.discovered.len(),
            expansions: outcome.stats.expansions,
            seconds,
        }
    }
}

/// Both directions on one grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridResult {
    /// Grid number.
    pub index: u32,
    /// Forward run.
    pub forward: RunSummary,
    /// Backward run.
    pub backward: RunSummary,
}

/// Totals for one direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionTotals {
    /// Runs that reached their goal.
    pub reached: usize,
    /// Episodes over all runs.
    pub episodes: u64,
    /// Expansions over all runs.
    pub expansions: u64,
    /// Solve time over all runs, in seconds.
    pub seconds: f64,
}

impl DirectionTotals {
    fn add(&mut self, run: &RunSummary) {
        self.reached += usize::from(run.reached);
        self.episodes += u64::from(run.episodes);
        self.expansions += run.expansions;
        self.seconds += run.seconds;
    }
}

/// Aggregate over every grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Grids solved without error.
    pub grids: usize,
    /// Forward totals.
    pub forward: DirectionTotals,
    /// Backward totals.
    pub backward: DirectionTotals,
}

impl BatchSummary {
    /// Sum per-grid results.
    pub fn from_results(results: &[GridResult]) -> Self {
        let mut summary = Self {
            grids: results.len(),
            ..Self::default()
        };
        for result in results {
            summary.forward.add(&result.forward);
            summary.backward.add(&result.backward);
        }
        summary
    }
}

/// Error during batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    /// Grid number
    pub index: u32,
    /// Error message
    pub message: String,
}

/// Results from a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Configuration used
    pub config: BatchConfig,
    /// Per-grid results, ordered by grid number
    pub grids: Vec<GridResult>,
    /// Aggregate summary
    pub summary: BatchSummary,
    /// Total wall-clock runtime
    pub duration_seconds: f64,
    /// Errors encountered
    pub errors: Vec<BatchError>,
}

impl BatchResults {
    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn run_direction(
    grid: &Grid,
    planner: PlannerConfig,
    direction: Direction,
) -> astar_core::error::Result<RunSummary> {
    let mut planner = RepeatedPlanner::new(planner.with_direction(direction));
    let start = Instant::now();
    let outcome = planner.execute(grid, grid.origin(), grid.far_corner())?;
    let seconds = start.elapsed().as_secs_f64();
    Ok(RunSummary::from_outcome(&outcome, seconds))
}

fn run_grid(
    index: u32,
    grid: &Grid,
    planner: PlannerConfig,
) -> std::result::Result<GridResult, BatchError> {
    let both = run_direction(grid, planner, Direction::Forward).and_then(|forward| {
        run_direction(grid, planner, Direction::Backward).map(|backward| (forward, backward))
    });
    match both {
        Ok((forward, backward)) => {
            debug!(
                index,
                forward_seconds = forward.seconds,
                backward_seconds = backward.seconds,
                "grid finished"
            );
            Ok(GridResult {
                index,
                forward,
                backward,
            })
        }
        Err(e) => {
            warn!("Grid {} failed: {}", index, e);
            Err(BatchError {
                index,
                message: e.to_string(),
            })
        }
    }
}

/// Run forward and backward repeated A* on every grid.
///
/// Each grid runs from `(0, 0)` to its far corner.
pub fn run_batch(grids: &[(u32, Grid)], config: BatchConfig) -> Result<BatchResults> {
    let start = Instant::now();
    info!("Starting batch run: {} grids", grids.len());

    let planner = config.planner;
    let solve_all = || -> Vec<std::result::Result<GridResult, BatchError>> {
        grids
            .par_iter()
            .map(|(index, grid)| run_grid(*index, grid, planner))
            .collect()
    };

    let results = if config.parallel > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel)
            .build()?
            .install(solve_all)
    } else {
        solve_all()
    };

    let (grid_results, errors): (Vec<_>, Vec<_>) =
        results.into_iter().partition(|r| r.is_ok());
    let mut grid_results: Vec<GridResult> =
        grid_results.into_iter().filter_map(|r| r.ok()).collect();
    let errors: Vec<BatchError> = errors.into_iter().filter_map(|r| r.err()).collect();
    grid_results.sort_by_key(|r| r.index);

    let summary = BatchSummary::from_results(&grid_results);
    let duration_seconds = start.elapsed().as_secs_f64();

    info!(
        "Batch complete: {} grids in {:.2}s (forward {:.3}s, backward {:.3}s)",
        summary.grids, duration_seconds, summary.forward.seconds, summary.backward.seconds
    );

    Ok(BatchResults {
        config,
        grids: grid_results,
        summary,
        duration_seconds,
        errors,
    })
}
