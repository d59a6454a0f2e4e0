//! Path assertions checked against a breadth-first oracle.

use astar_core::connectivity::shortest_distance;
use astar_core::grid::{Coord, Grid};
use astar_core::path::Path;

/// Assert that `path` walks open, adjacent cells from `start` to `goal`.
///
/// # Panics
///
/// Panics with a description of the first violated property.
pub fn assert_valid_path(grid: &Grid, path: &Path, start: Coord, goal: Coord) {
    assert_eq!(path.first(), Some(start), "path must begin at {start}");
    assert_eq!(path.last(), Some(goal), "path must end at {goal}");
    assert!(path.is_contiguous(), "path has a non-adjacent step: {path:?}");
    for cell in path {
        assert!(
            grid.reachable(cell.x, cell.y).unwrap_or(false),
            "path crosses blocked or out-of-range cell {cell}"
        );
    }
}

/// Assert that a search result agrees with breadth-first search.
///
/// A path must be valid and exactly as long as the BFS distance; `None`
/// must mean BFS found no route either.
///
/// # Panics
///
/// Panics if the result disagrees with the oracle or an endpoint is out
/// of range.
pub fn assert_optimal(grid: &Grid, start: Coord, goal: Coord, found: Option<&Path>) {
    let expected = shortest_distance(grid, start, goal).expect("endpoints must be in range");
    match (found, expected) {
        (Some(path), Some(distance)) => {
            assert_valid_path(grid, path, start, goal);
            assert_eq!(
                path.moves(),
                distance as usize,
                "path from {start} to {goal} is not shortest"
            );
        }
        (None, None) => {}
        (Some(path), None) => panic!("found {path:?} but {start} and {goal} are disconnected"),
        (None, Some(distance)) => {
            panic!("no path found from {start} to {goal}, BFS distance is {distance}")
        }
    }
}
