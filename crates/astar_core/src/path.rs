//! Planned and walked routes.

use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Grid};

/// Ordered cells from start to goal, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    cells: Vec<Coord>,
}

impl Path {
    /// Wrap a cell sequence.
    #[must_use]
    pub fn new(cells: Vec<Coord>) -> Self {
        Self { cells }
    }

    /// Number of cells, endpoints included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the path holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of unit moves (cells minus one).
    #[must_use]
    pub fn moves(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// First cell.
    #[must_use]
    pub fn first(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    /// Last cell.
    #[must_use]
    pub fn last(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    /// Borrow the cells.
    #[must_use]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Iterate over the cells in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.cells.iter()
    }

    /// Every consecutive pair is a single 4-connected step.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    /// Contiguous and every cell is in bounds and open in `grid`.
    #[must_use]
    pub fn is_valid_on(&self, grid: &Grid) -> bool {
        self.is_contiguous()
            && self
                .cells
                .iter()
                .all(|c| grid.reachable(c.x, c.y).unwrap_or(false))
    }

    /// Consume into the underlying cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<Coord> {
        self.cells
    }
}

impl From<Vec<Coord>> for Path {
    fn from(cells: Vec<Coord>) -> Self {
        Self::new(cells)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
