//! # A* Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Grid fixtures drawn as ASCII art
//! - BFS oracle assertions for path optimality
//! - Determinism test harness
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod fixtures;
pub mod oracle;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
