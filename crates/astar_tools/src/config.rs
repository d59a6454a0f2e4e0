//! RON configuration files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ToolError};

/// Load any RON-encoded value from a file.
///
/// # Example
///
/// ```ignore
/// let config: PlannerConfig = load_ron(Path::new("planner.ron"))?;
/// ```
pub fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(ToolError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    let value = ron::from_str(&text)?;
    debug!(path = %path.display(), "loaded config");
    Ok(value)
}

/// Write a value as pretty RON, creating parent directories.
pub fn save_ron<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())?;
    fs::write(path, text)?;
    Ok(())
}
