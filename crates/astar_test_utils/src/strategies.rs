//! Proptest strategies for planner testing.
//!
//! These strategies generate random but reproducible grids, endpoints and
//! configurations for property-based testing.

use astar_core::config::PlannerConfig;
use astar_core::frontier::TieBreak;
use astar_core::grid::{Coord, Grid};
use astar_core::repeated::{Direction, Knowledge, Sensing};
use proptest::prelude::*;

/// Largest side generated by [`arb_grid`].
pub const MAX_SIDE: u32 = 16;

/// A grid between 1x1 and [`MAX_SIDE`] square with roughly
/// `density_percent` of its cells blocked.
pub fn arb_grid(density_percent: u32) -> impl Strategy<Value = Grid> {
    (1..=MAX_SIDE, 1..=MAX_SIDE).prop_flat_map(move |(width, height)| {
        let cells = (width as usize) * (height as usize);
        prop::collection::vec(
            (0u32..100).prop_map(move |roll| roll < density_percent),
            cells,
        )
        .prop_map(move |blocked| {
            Grid::from_cells(width, height, blocked).expect("cell count matches dimensions")
        })
    })
}

/// A grid together with two in-range endpoints.
pub fn arb_scenario(density_percent: u32) -> impl Strategy<Value = (Grid, Coord, Coord)> {
    arb_grid(density_percent).prop_flat_map(|grid| {
        let (w, h) = (grid.width(), grid.height());
        (
            Just(grid),
            (0..w, 0..h).prop_map(|(x, y)| Coord::new(x, y)),
            (0..w, 0..h).prop_map(|(x, y)| Coord::new(x, y)),
        )
    })
}

/// Either tie-break policy.
pub fn arb_tie_break() -> impl Strategy<Value = TieBreak> {
    prop_oneof![Just(TieBreak::GreaterG), Just(TieBreak::LesserG)]
}

/// Either direction.
pub fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

/// Any planner configuration.
pub fn arb_planner_config() -> impl Strategy<Value = PlannerConfig> {
    (
        arb_tie_break(),
        arb_direction(),
        prop_oneof![Just(Knowledge::FreeSpace), Just(Knowledge::Full)],
        prop_oneof![Just(Sensing::OnStep), Just(Sensing::Adjacent)],
    )
        .prop_map(|(tie_break, direction, knowledge, sensing)| PlannerConfig {
            tie_break,
            direction,
            knowledge,
            sensing,
        })
}
