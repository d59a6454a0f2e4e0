//! Error types for grid planning.

use thiserror::Error;

/// Result type alias using [`PlanError`].
pub type Result<T> = std::result::Result<T, PlanError>;

/// Top-level error type for all planning errors.
///
/// "No path" is not an error: searches report it as `Ok(None)` so callers
/// can react to it as a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A coordinate lookup fell outside the grid.
    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        /// Requested x.
        x: u32,
        /// Requested y.
        y: u32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// Grid data could not be built or parsed.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// A configuration value is outside its allowed range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The generator could not produce a connected grid.
    #[error("No connected grid after {attempts} attempts")]
    GenerationExhausted {
        /// Number of grids generated and rejected.
        attempts: u32,
    },
}
