//! Grid files on disk.
//!
//! A grid file holds one line per `x` with one `'0'`/`'1'` character per
//! `y`. A gridworld directory holds numbered files `1.txt`, `2.txt`, ...

use std::fs;
use std::path::{Path, PathBuf};

use astar_core::grid::Grid;
use tracing::{debug, warn};

use crate::error::{Result, ToolError};

/// Read and parse one grid file.
pub fn load_grid(path: &Path) -> Result<Grid> {
    if !path.exists() {
        return Err(ToolError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    Ok(Grid::parse(&text)?)
}

/// Write one grid file, creating parent directories.
pub fn save_grid(path: &Path, grid: &Grid) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, grid.to_text())?;
    Ok(())
}

/// Path of grid number `index` inside `dir`.
#[must_use]
pub fn gridworld_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("{index}.txt"))
}

/// Write `grids` as `1.txt` onward. Returns the written paths.
pub fn save_gridworld(dir: &Path, grids: &[Grid]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(grids.len());
    for (index, grid) in (1u32..).zip(grids) {
        let path = gridworld_path(dir, index);
        save_grid(&path, grid)?;
        debug!(path = %path.display(), "saved grid");
        written.push(path);
    }
    Ok(written)
}

/// Load every numbered grid in `dir`, ordered by number.
///
/// Files whose stem is not a number are skipped.
pub fn load_gridworld(dir: &Path) -> Result<Vec<(u32, Grid)>> {
    if !dir.is_dir() {
        return Err(ToolError::NotFound(dir.to_path_buf()));
    }

    let mut numbered = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        match path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u32>().ok())
        {
            Some(index) => numbered.push((index, path)),
            None => warn!(path = %path.display(), "skipping unnumbered grid file"),
        }
    }
    numbered.sort_unstable_by_key(|(index, _)| *index);

    numbered
        .into_iter()
        .map(|(index, path)| Ok((index, load_grid(&path)?)))
        .collect()
}
