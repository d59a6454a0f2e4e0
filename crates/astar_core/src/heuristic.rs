//! Distance heuristic for 4-connected unit-cost grids.

use crate::grid::Coord;

/// Manhattan distance between two cells.
///
/// Admissible and consistent for 4-connected movement with unit step cost,
/// which is what lets A* close each cell exactly once.
#[inline]
#[must_use]
pub fn manhattan(cell: Coord, goal: Coord) -> u32 {
    cell.x.abs_diff(goal.x) + cell.y.abs_diff(goal.y)
}
