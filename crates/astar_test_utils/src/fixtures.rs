//! Test fixtures and helpers.
//!
//! Grids are drawn one row per `x`, `'#'` for blocked and `'.'` for open,
//! so the art reads the same way the text format does.

use astar_core::grid::{Coord, Grid};

/// Shorthand for [`Coord::new`].
#[must_use]
pub const fn c(x: u32, y: u32) -> Coord {
    Coord::new(x, y)
}

/// Build a grid from ASCII art.
///
/// # Panics
///
/// Panics on characters other than `'#'` and `'.'` or on ragged rows.
#[must_use]
pub fn grid_from_art(rows: &[&str]) -> Grid {
    let cells: Vec<Vec<bool>> = rows
        .iter()
        .map(|row| {
            row.chars()
                .map(|ch| match ch {
                    '#' => true,
                    '.' => false,
                    other => panic!("unexpected fixture character {other:?}"),
                })
                .collect()
        })
        .collect();
    Grid::from_rows(&cells).expect("fixture rows must be rectangular")
}

/// A fully open grid.
#[must_use]
pub fn open_grid(width: u32, height: u32) -> Grid {
    Grid::new(width, height)
}

/// A grid with row `x` fully blocked except for an optional gap at `y`.
#[must_use]
pub fn wall_grid(width: u32, height: u32, x: u32, gap: Option<u32>) -> Grid {
    let mut grid = Grid::new(width, height);
    for y in 0..height {
        if Some(y) != gap {
            grid.set_blocked(c(x, y), true)
                .expect("wall row must be inside the grid");
        }
    }
    grid
}

/// A serpentine maze: walls on every other row with the gap alternating
/// between the last and first column. The only route zig-zags.
#[must_use]
pub fn serpentine_grid(width: u32, height: u32) -> Grid {
    let mut grid = Grid::new(width, height);
    for (i, x) in (1..width).step_by(2).enumerate() {
        let gap = if i % 2 == 0 { height - 1 } else { 0 };
        for y in (0..height).filter(|&y| y != gap) {
            grid.set_blocked(c(x, y), true)
                .expect("serpentine wall must be inside the grid");
        }
    }
    grid
}
