//! Planner configuration.
//!
//! Stored as RON on disk; every field has a default so partial files load.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::frontier::TieBreak;
use crate::repeated::{Direction, Knowledge, Sensing};

/// Settings for [`RepeatedPlanner`](crate::repeated::RepeatedPlanner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Frontier ordering for equal `f`.
    pub tie_break: TieBreak,
    /// Search from origin (forward) or from destination (backward).
    pub direction: Direction,
    /// Prior belief about unobserved cells.
    pub knowledge: Knowledge,
    /// When blocked cells become known.
    pub sensing: Sensing,
}

impl PlannerConfig {
    /// Set the tie-break policy.
    #[must_use]
    pub const fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set the search direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the knowledge model.
    #[must_use]
    pub const fn with_knowledge(mut self, knowledge: Knowledge) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Set the sensing model.
    #[must_use]
    pub const fn with_sensing(mut self, sensing: Sensing) -> Self {
        self.sensing = sensing;
        self
    }

    /// Parse from RON text.
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| PlanError::InvalidConfig(e.to_string()))
    }

    /// Serialize to pretty RON text.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| PlanError::InvalidConfig(e.to_string()))
    }
}
