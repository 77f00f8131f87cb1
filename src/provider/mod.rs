//! Schema sources and JSON snapshots.
//!
//! A source is either a PostgreSQL URL (`postgres://` or `postgresql://`),
//! to be introspected live, or a JSON snapshot (`json:<path>` or any path ending in `.json`).

use crate::model::Schema;
use crate::util::{Result, SchemaError};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource<'a> {
    Database(&'a str),
    Snapshot(&'a Path),
}

pub fn parse_source(source: &str) -> Option<SchemaSource<'_>> {
    if source.starts_with("postgres://") || source.starts_with("postgresql://") {
        Some(SchemaSource::Database(source))
    } else if let Some(path) = source.strip_prefix("json:") {
        Some(SchemaSource::Snapshot(Path::new(path)))
    } else if source.ends_with(".json") {
        Some(SchemaSource::Snapshot(Path::new(source)))
    } else {
        None
    }
}

pub fn load_snapshot(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SchemaError::SnapshotError(format!("Failed to read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        SchemaError::SnapshotError(format!("Invalid snapshot {}: {e}", path.display()))
    })
}

pub fn save_snapshot(schema: &Schema, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(schema)
        .map_err(|e| SchemaError::SnapshotError(format!("Failed to serialize schema: {e}")))?;
    std::fs::write(path, json + "\n").map_err(|e| {
        SchemaError::SnapshotError(format!("Failed to write {}: {e}", path.display()))
    })
}
