//! Breadth-first reachability over open cells.

use std::collections::VecDeque;

use crate::error::Result;
use crate::grid::{Coord, Grid};

/// Step distance from `from` to every cell, indexed by cell id.
///
/// `None` marks cells that cannot be reached. A blocked `from` reaches
/// nothing, itself included.
pub fn bfs_distances(grid: &Grid, from: Coord) -> Result<Vec<Option<u32>>> {
    let from_id = grid.checked_id(from)?;
    let mut distances = vec![None; grid.cell_count()];
    if !grid.reachable_id(from_id) {
        return Ok(distances);
    }

    let mut queue = VecDeque::from([from]);
    distances[from_id] = Some(0);

    while let Some(current) = queue.pop_front() {
        let next = distances[grid.cell_id(current)].map_or(0, |d| d + 1);
        for neighbor in grid.neighbors(current) {
            let id = grid.cell_id(neighbor);
            if grid.reachable_id(id) && distances[id].is_none() {
                distances[id] = Some(next);
                queue.push_back(neighbor);
            }
        }
    }

    Ok(distances)
}

/// Length in moves of a shortest route, `None` if disconnected.
pub fn shortest_distance(grid: &Grid, from: Coord, to: Coord) -> Result<Option<u32>> {
    let to_id = grid.checked_id(to)?;
    Ok(bfs_distances(grid, from)?[to_id])
}

/// Whether an open route joins `from` and `to`.
pub fn is_connected(grid: &Grid, from: Coord, to: Coord) -> Result<bool> {
    Ok(shortest_distance(grid, from, to)?.is_some())
}
