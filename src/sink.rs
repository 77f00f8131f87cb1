use crate::pg::sqlgen::Script;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "SqlScripts";

/// Generates a script filename like "UpdateScript_20240131_174502.sql".
pub fn script_filename(timestamp: NaiveDateTime) -> String {
    format!("UpdateScript_{}.sql", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Writes the rendered script into `dir`, creating the directory if needed.
/// Returns the path of the written file.
pub fn write_script(dir: &Path, script: &Script, timestamp: NaiveDateTime) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(script_filename(timestamp));
    std::fs::write(&path, script.render())?;
    tracing::info!(path = %path.display(), "wrote update script");
    Ok(path)
}
