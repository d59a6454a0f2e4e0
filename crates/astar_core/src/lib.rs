//! # A* Core
//!
//! Deterministic shortest-path planning on 4-connected occupancy grids.
//!
//! This crate contains **only** deterministic logic:
//! - No file or terminal IO
//! - No unseeded randomness
//! - No floating-point costs (integer g/h/f throughout)
//!
//! Given the same grid, endpoints and configuration, every search returns
//! the same path, so runs can be compared, replayed and parallelized
//! across grids.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Occupancy grid, coordinates and the text format
//! - [`path`] - Cell sequences returned by searches
//! - [`heuristic`] - Manhattan distance
//! - [`node`] - Per-episode search state arena
//! - [`frontier`] - Open set with configurable tie-breaking
//! - [`astar`] - Single-episode A* search
//! - [`repeated`] - Repeated A* with obstacle discovery
//! - [`connectivity`] - BFS reachability
//! - [`generation`] - Seeded random grids
//! - [`config`] - Planner configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod astar;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod frontier;
pub mod generation;
pub mod grid;
pub mod heuristic;
pub mod node;
pub mod path;
pub mod repeated;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::astar::{find_path, AStar, SearchOutcome, SearchStats};
    pub use crate::config::PlannerConfig;
    pub use crate::error::{PlanError, Result};
    pub use crate::frontier::TieBreak;
    pub use crate::generation::GenerationConfig;
    pub use crate::grid::{Coord, Grid};
    pub use crate::path::Path;
    pub use crate::repeated::{
        Direction, Knowledge, RepeatedOutcome, RepeatedPlanner, RepeatedState, Sensing,
    };
}
