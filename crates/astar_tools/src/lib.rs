//! # A* Tools
//!
//! Everything around the planner that touches the outside world:
//! - Grid files and numbered `gridworld/` directories
//! - RON configuration files
//! - ASCII rendering of grids, paths and discoveries
//! - Parallel forward/backward comparison over many grids

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod batch;
pub mod config;
pub mod error;
pub mod gridworld;
pub mod render;
