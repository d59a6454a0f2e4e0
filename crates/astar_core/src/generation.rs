//! Seeded random occupancy grids.
//!
//! Each cell is blocked independently with a fixed probability. A grid is
//! accepted only if the corners `(0, 0)` and `(width - 1, height - 1)` are
//! joined by an open route, so every accepted grid has at least one
//! solution for the default endpoints.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::connectivity::is_connected;
use crate::error::{PlanError, Result};
use crate::grid::Grid;

/// Generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Chance that any one cell is blocked.
    pub obstacle_probability: f64,
    /// Seed for the random stream.
    pub seed: u64,
    /// Rejected grids tolerated per accepted grid.
    pub max_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 101,
            height: 101,
            obstacle_probability: 0.3,
            seed: 0,
            max_attempts: 10_000,
        }
    }
}

impl GenerationConfig {
    /// Set the grid size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the obstacle probability.
    #[must_use]
    pub fn with_obstacle_probability(mut self, probability: f64) -> Self {
        self.obstacle_probability = probability;
        self
    }

    /// Check ranges.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlanError::InvalidConfig(format!(
                "grid size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.obstacle_probability) {
            return Err(PlanError::InvalidConfig(format!(
                "obstacle probability must be within [0, 1], got {}",
                self.obstacle_probability
            )));
        }
        if self.max_attempts == 0 {
            return Err(PlanError::InvalidConfig("max_attempts must be positive".into()));
        }
        Ok(())
    }
}

/// Draw one grid without any connectivity check.
pub fn generate_grid<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Result<Grid> {
    config.validate()?;
    draw_grid(config, rng)
}

/// Draw one grid from an already validated configuration.
fn draw_grid<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Result<Grid> {
    let cells = (config.width as usize) * (config.height as usize);
    let blocked = (0..cells)
        .map(|_| rng.gen_bool(config.obstacle_probability))
        .collect();
    Grid::from_cells(config.width, config.height, blocked)
}

/// Draw grids until one connects its corners.
pub fn generate_connected<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Result<Grid> {
    config.validate()?;
    for attempt in 1..=config.max_attempts {
        let grid = draw_grid(config, rng)?;
        if is_connected(&grid, grid.origin(), grid.far_corner())? {
            debug!(attempt, blocked = grid.blocked_count(), "accepted grid");
            return Ok(grid);
        }
    }
    Err(PlanError::GenerationExhausted {
        attempts: config.max_attempts,
    })
}

/// Produce `count` connected grids from the configured seed.
///
/// The same configuration always yields the same grids.
pub fn generate_batch(config: &GenerationConfig, count: usize) -> Result<Vec<Grid>> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    (0..count)
        .map(|_| generate_connected(config, &mut rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GenerationConfig {
        GenerationConfig::default().with_size(12, 9).with_seed(7)
    }

    #[test]
    fn test_accepted_grids_are_connected() {
        let grids = generate_batch(&small(), 5).unwrap();
        assert_eq!(grids.len(), 5);
        for grid in &grids {
            assert_eq!(grid.width(), 12);
            assert_eq!(grid.height(), 9);
            assert!(is_connected(grid, grid.origin(), grid.far_corner()).unwrap());
        }
    }

    #[test]
    fn test_same_seed_same_grids() {
        let a = generate_batch(&small(), 3).unwrap();
        let b = generate_batch(&small(), 3).unwrap();
        assert_eq!(a, b);

        let c = generate_batch(&small().with_seed(8), 3).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_probability_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let open = generate_grid(&small().with_obstacle_probability(0.0), &mut rng).unwrap();
        assert_eq!(open.blocked_count(), 0);

        let closed = generate_grid(&small().with_obstacle_probability(1.0), &mut rng).unwrap();
        assert_eq!(closed.blocked_count(), closed.cell_count());
    }

    #[test]
    fn test_full_obstacles_exhaust_attempts() {
        let config = GenerationConfig {
            max_attempts: 3,
            ..small().with_obstacle_probability(1.0)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            generate_connected(&config, &mut rng),
            Err(PlanError::GenerationExhausted { attempts: 3 })
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(small().with_obstacle_probability(1.5).validate().is_err());
        assert!(small().with_obstacle_probability(f64::NAN).validate().is_err());
        assert!(small().with_size(0, 3).validate().is_err());
        assert!(generate_batch(&small().with_size(3, 0), 1).is_err());
    }

    #[test]
    fn test_generate_grid_rejects_bad_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for probability in [1.5, -0.1, f64::NAN] {
            let result = generate_grid(&small().with_obstacle_probability(probability), &mut rng);
            assert!(matches!(result, Err(PlanError::InvalidConfig(_))));
        }
    }
}
