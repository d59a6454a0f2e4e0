//! Error types for the tools crate.

use std::path::PathBuf;

use astar_core::error::PlanError;
use thiserror::Error;

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised while reading, writing or running planner jobs.
#[derive(Error, Debug)]
pub enum ToolError {
    /// A required file or directory does not exist.
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed RON configuration.
    #[error("Failed to parse config: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// RON serialization failure.
    #[error("Failed to write config: {0}")]
    RonWrite(#[from] ron::Error),

    /// Malformed or unwritable JSON results.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Planner rejected its input.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Worker pool could not be started.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
