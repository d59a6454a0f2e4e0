//! ASCII rendering of grids, paths and discovered obstacles.
//!
//! Rows are `x`, columns are `y`, matching the text file layout.

use astar_core::grid::{Coord, Grid};
use astar_core::path::Path;

/// ANSI color codes.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const DIM: &str = "\x1b[2m";
}

/// Configuration for ASCII rendering.
#[derive(Debug, Clone)]
pub struct AsciiConfig {
    /// Draw a box around the grid.
    pub show_border: bool,
    /// Append a symbol legend.
    pub show_legend: bool,
    /// Use colored output (ANSI).
    pub use_color: bool,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            show_border: true,
            show_legend: true,
            use_color: false,
        }
    }
}

/// What to draw over the grid.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    path: Vec<Coord>,
    discovered: Vec<Coord>,
    start: Option<Coord>,
    goal: Option<Coord>,
}

impl Overlay {
    /// Empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the cells of a path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path.extend(path.iter().copied());
        self
    }

    /// Mark cells found blocked during a run.
    pub fn with_discovered(mut self, cells: &[Coord]) -> Self {
        self.discovered.extend_from_slice(cells);
        self
    }

    /// Mark the endpoints.
    pub fn with_endpoints(mut self, start: Coord, goal: Coord) -> Self {
        self.start = Some(start);
        self.goal = Some(goal);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Open,
    Blocked,
    Discovered,
    Path,
    Start,
    Goal,
}

impl Mark {
    const fn symbol(self) -> char {
        match self {
            Self::Open => '.',
            Self::Blocked => '#',
            Self::Discovered => 'x',
            Self::Path => '*',
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }

    const fn color(self) -> &'static str {
        match self {
            Self::Open => colors::DIM,
            Self::Blocked => "",
            Self::Discovered => colors::RED,
            Self::Path => colors::YELLOW,
            Self::Start | Self::Goal => colors::GREEN,
        }
    }
}

/// Render `grid` with `overlay` drawn on top.
///
/// Later layers win: blocked, discovered, path, then endpoints.
pub fn render_ascii(grid: &Grid, overlay: &Overlay, config: &AsciiConfig) -> String {
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    let mut marks: Vec<Mark> = (0..grid.cell_count())
        .map(|id| {
            if grid.reachable_id(id) {
                Mark::Open
            } else {
                Mark::Blocked
            }
        })
        .collect();

    let layers = [
        (overlay.discovered.as_slice(), Mark::Discovered),
        (overlay.path.as_slice(), Mark::Path),
        (overlay.start.as_slice(), Mark::Start),
        (overlay.goal.as_slice(), Mark::Goal),
    ];
    for (cells, mark) in layers {
        for &cell in cells {
            if grid.in_bounds(cell.x, cell.y) {
                marks[grid.cell_id(cell)] = mark;
            }
        }
    }

    let mut output = String::with_capacity((width + 3) * (height + 2));
    if config.show_border {
        push_rule(&mut output, '┌', '┐', height);
    }
    for row in marks.chunks(height) {
        if config.show_border {
            output.push('│');
        }
        for &mark in row {
            if config.use_color && !mark.color().is_empty() {
                output.push_str(mark.color());
                output.push(mark.symbol());
                output.push_str(colors::RESET);
            } else {
                output.push(mark.symbol());
            }
        }
        if config.show_border {
            output.push('│');
        }
        output.push('\n');
    }
    if config.show_border {
        push_rule(&mut output, '└', '┘', height);
    }

    if config.show_legend {
        let (bold, reset) = if config.use_color {
            (colors::BOLD, colors::RESET)
        } else {
            ("", "")
        };
        output.push_str(&format!(
            "{bold}S{reset}=start {bold}G{reset}=goal *=path x=discovered #=blocked .=open\n"
        ));
    }

    output
}

fn push_rule(output: &mut String, left: char, right: char, len: usize) {
    output.push(left);
    output.extend(std::iter::repeat('─').take(len));
    output.push(right);
    output.push('\n');
}
