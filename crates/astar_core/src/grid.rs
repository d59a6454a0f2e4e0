//! Occupancy grid model.
//!
//! Cells are addressed by `(x, y)` with `x` in `[0, width)` and `y` in
//! `[0, height)`. Storage is x-major: the cell id of `(x, y)` is
//! `x * height + y`.
//!
//! # Text format
//!
//! One line per `x`, one character per `y`. `'1'` is blocked and `'0'` is
//! open, so a `width x height` grid is `width` lines of `height` characters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Neighbor offsets in enumeration order: +x, -y, -x, +y.
///
/// The order decides which of several equal-priority neighbors is pushed
/// first, so it is part of the deterministic output.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

/// A cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row index (line number in the text format).
    pub x: u32,
    /// Column index (character offset in the text format).
    pub y: u32,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Offset by a signed delta, `None` on underflow or overflow.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Whether `other` is exactly one unit step away on exactly one axis.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

impl From<(u32, u32)> for Coord {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular occupancy grid.
///
/// Deserialization goes through [`Grid::from_cells`], so a decoded grid
/// always holds exactly `width * height` cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    /// Extent along x.
    width: u32,
    /// Extent along y.
    height: u32,
    /// `true` for blocked cells, x-major.
    blocked: Vec<bool>,
}

/// Unchecked serde shape of [`Grid`].
#[derive(Deserialize)]
struct RawGrid {
    width: u32,
    height: u32,
    blocked: Vec<bool>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = PlanError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Self::from_cells(raw.width, raw.height, raw.blocked)
    }
}

impl Grid {
    /// Create a grid with every cell open.
    ///
    /// Meant for fixed, known-good sizes in tests and internal code. Use
    /// [`Grid::from_cells`] for sizes that come from outside.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0, "Grid width must be positive");
        assert!(height > 0, "Grid height must be positive");

        Self {
            width,
            height,
            blocked: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Create a grid from x-major blocked flags.
    pub fn from_cells(width: u32, height: u32, blocked: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PlanError::InvalidGrid(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        let expected = (width as usize) * (height as usize);
        if blocked.len() != expected {
            return Err(PlanError::InvalidGrid(format!(
                "expected {expected} cells for {width}x{height}, got {}",
                blocked.len()
            )));
        }
        Ok(Self {
            width,
            height,
            blocked,
        })
    }

    /// Create a grid from rows of blocked flags, one row per `x`.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let width = u32::try_from(rows.len())
            .map_err(|_| PlanError::InvalidGrid("too many rows".into()))?;
        let height = rows.first().map_or(0, Vec::len);
        if let Some((x, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != height) {
            return Err(PlanError::InvalidGrid(format!(
                "row {x} has {} cells, expected {height}",
                row.len()
            )));
        }
        let height = u32::try_from(height)
            .map_err(|_| PlanError::InvalidGrid("row too long".into()))?;
        Self::from_cells(width, height, rows.concat())
    }

    /// Parse the text format.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<bool>> = text
            .lines()
            .enumerate()
            .map(|(x, line)| {
                line.trim_end_matches('\r')
                    .chars()
                    .enumerate()
                    .map(|(y, c)| match c {
                        '0' => Ok(false),
                        '1' => Ok(true),
                        other => Err(PlanError::InvalidGrid(format!(
                            "unexpected character {other:?} at line {x}, column {y}"
                        ))),
                    })
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<_>>()?;

        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }
        if rows.is_empty() {
            return Err(PlanError::InvalidGrid("no rows".into()));
        }
        Self::from_rows(&rows)
    }

    /// Render in the text format, one `\n`-terminated line per row.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.blocked.len() + self.width as usize);
        for row in self.blocked.chunks(self.height as usize) {
            out.extend(row.iter().map(|&b| if b { '1' } else { '0' }));
            out.push('\n');
        }
        out
    }

    /// Grid width (number of rows).
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height (cells per row).
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    /// Check if coordinates are within grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Arena index of an in-bounds coordinate.
    ///
    /// Callers must check bounds first; see [`Grid::checked_id`].
    #[inline]
    #[must_use]
    pub fn cell_id(&self, coord: Coord) -> usize {
        (coord.x as usize) * (self.height as usize) + (coord.y as usize)
    }

    /// Arena index, failing with [`PlanError::OutOfRange`].
    pub fn checked_id(&self, coord: Coord) -> Result<usize> {
        if self.in_bounds(coord.x, coord.y) {
            Ok(self.cell_id(coord))
        } else {
            Err(self.out_of_range(coord))
        }
    }

    /// Inverse of [`Grid::cell_id`].
    #[inline]
    #[must_use]
    pub fn coord_of(&self, id: usize) -> Coord {
        let height = self.height as usize;
        Coord::new((id / height) as u32, (id % height) as u32)
    }

    /// Whether the cell at `(x, y)` can be entered.
    pub fn reachable(&self, x: u32, y: u32) -> Result<bool> {
        let id = self.checked_id(Coord::new(x, y))?;
        Ok(!self.blocked[id])
    }

    /// Whether the cell with the given arena index can be entered.
    #[inline]
    #[must_use]
    pub fn reachable_id(&self, id: usize) -> bool {
        !self.blocked[id]
    }

    /// Mark a cell blocked or open.
    pub fn set_blocked(&mut self, coord: Coord, blocked: bool) -> Result<()> {
        let id = self.checked_id(coord)?;
        self.blocked[id] = blocked;
        Ok(())
    }

    /// Mark the cell with the given arena index blocked.
    #[inline]
    pub fn block_id(&mut self, id: usize) {
        self.blocked[id] = true;
    }

    /// Number of blocked cells.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// In-bounds 4-neighbors in fixed order: +x, -y, -x, +y.
    ///
    /// Reachability is not checked.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dx, dy)| {
            coord
                .offset(dx, dy)
                .filter(|n| self.in_bounds(n.x, n.y))
        })
    }

    /// Corner `(0, 0)`.
    #[must_use]
    pub const fn origin(&self) -> Coord {
        Coord::new(0, 0)
    }

    /// Corner `(width - 1, height - 1)`.
    #[must_use]
    pub const fn far_corner(&self) -> Coord {
        Coord::new(self.width - 1, self.height - 1)
    }

    fn out_of_range(&self, coord: Coord) -> PlanError {
        PlanError::OutOfRange {
            x: coord.x,
            y: coord.y,
            width: self.width,
            height: self.height,
        }
    }
}

impl FromStr for Grid {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_open() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cell_count(), 12);
        assert_eq!(grid.blocked_count(), 0);
        assert!(grid.reachable(3, 2).unwrap());
    }

    #[test]
    #[should_panic(expected = "Grid width must be positive")]
    fn test_new_rejects_zero_width() {
        let _ = Grid::new(0, 3);
    }

    #[test]
    fn test_cell_id_is_x_major() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.cell_id(Coord::new(0, 0)), 0);
        assert_eq!(grid.cell_id(Coord::new(0, 2)), 2);
        assert_eq!(grid.cell_id(Coord::new(1, 0)), 3);
        assert_eq!(grid.cell_id(Coord::new(3, 2)), 11);
        for id in 0..grid.cell_count() {
            assert_eq!(grid.cell_id(grid.coord_of(id)), id);
        }
    }

    #[test]
    fn test_out_of_range_lookup() {
        let grid = Grid::new(4, 3);
        assert_eq!(
            grid.reachable(4, 0),
            Err(PlanError::OutOfRange {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(grid.reachable(0, 3).is_err());
        assert!(!grid.in_bounds(0, 3));
    }

    #[test]
    fn test_set_blocked() {
        let mut grid = Grid::new(3, 3);
        grid.set_blocked(Coord::new(1, 1), true).unwrap();
        assert!(!grid.reachable(1, 1).unwrap());
        assert_eq!(grid.blocked_count(), 1);

        grid.set_blocked(Coord::new(1, 1), false).unwrap();
        assert!(grid.reachable(1, 1).unwrap());

        assert!(grid.set_blocked(Coord::new(3, 0), true).is_err());
    }

    #[test]
    fn test_neighbor_order() {
        let grid = Grid::new(3, 3);
        let around: Vec<Coord> = grid.neighbors(Coord::new(1, 1)).collect();
        assert_eq!(
            around,
            vec![
                Coord::new(2, 1),
                Coord::new(1, 0),
                Coord::new(0, 1),
                Coord::new(1, 2)
            ]
        );
    }

    #[test]
    fn test_corner_neighbors_stay_in_bounds() {
        let grid = Grid::new(3, 3);
        let origin: Vec<Coord> = grid.neighbors(Coord::new(0, 0)).collect();
        assert_eq!(origin, vec![Coord::new(1, 0), Coord::new(0, 1)]);

        let far: Vec<Coord> = grid.neighbors(Coord::new(2, 2)).collect();
        assert_eq!(far, vec![Coord::new(2, 1), Coord::new(1, 2)]);
    }

    #[test]
    fn test_parse_text() {
        let grid = Grid::parse("0010\n0000\r\n1000\n\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 4);
        assert!(!grid.reachable(0, 2).unwrap());
        assert!(!grid.reachable(2, 0).unwrap());
        assert!(grid.reachable(1, 3).unwrap());
        assert_eq!(grid.to_text(), "0010\n0000\n1000\n");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(Grid::parse(""), Err(PlanError::InvalidGrid(_))));
        assert!(matches!(
            Grid::parse("000\n00\n"),
            Err(PlanError::InvalidGrid(_))
        ));
        assert!(matches!(
            Grid::parse("0#0\n"),
            Err(PlanError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_from_cells_checks_length() {
        assert!(Grid::from_cells(2, 2, vec![false; 3]).is_err());
        assert!(Grid::from_cells(0, 2, Vec::new()).is_err());
        assert!(Grid::from_cells(2, 2, vec![false; 4]).is_ok());
    }

    #[test]
    fn test_coord_adjacency() {
        let c = Coord::new(2, 2);
        assert!(c.is_adjacent(Coord::new(2, 3)));
        assert!(c.is_adjacent(Coord::new(1, 2)));
        assert!(!c.is_adjacent(Coord::new(3, 3)));
        assert!(!c.is_adjacent(c));
        assert_eq!(Coord::new(0, 0).offset(-1, 0), None);
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let short = ron::from_str::<Grid>("(width: 2, height: 2, blocked: [false])");
        assert!(short.is_err());

        let zero = ron::from_str::<Grid>("(width: 0, height: 1, blocked: [])");
        assert!(zero.is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut grid = Grid::new(2, 3);
        grid.set_blocked(Coord::new(1, 2), true).unwrap();
        let text = ron::to_string(&grid).unwrap();
        let decoded: Grid = ron::from_str(&text).unwrap();
        assert_eq!(decoded, grid);
        assert_eq!(decoded.reachable(1, 2), Ok(false));
    }
}
