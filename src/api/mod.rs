//! High-level API for embedding comparadb in other applications.
//!
//! These functions mirror the CLI commands with structured inputs and outputs.
//! Both async and blocking variants are available.
//!
//! # Example
//!
//! ```no_run
//! use comparadb::api::{compare_blocking, CompareOptions};
//!
//! let result = compare_blocking(CompareOptions::new(
//!     "postgres://localhost/shop_prod",
//!     "postgres://localhost/shop_staging",
//! )).unwrap();
//!
//! if let Some(script) = result.outcome.script() {
//!     print!("{}", script.render());
//! }
//! ```
//!
//! Blocking variants create a new tokio runtime per call.

mod error;
mod options;
mod results;

pub use error::Error;
pub use options::{CompareOptions, SnapshotOptions, DEFAULT_TARGET_SCHEMA};
pub use results::{CompareResult, SnapshotResult};

use crate::diff::compute_diff;
use crate::model::Schema;
use crate::pg::connection::PgConnection;
use crate::pg::introspect::introspect_schema;
use crate::pg::sqlgen::generate_script;
use crate::provider::{load_snapshot, parse_source, SchemaSource};

async fn read_schema(source: &str, target_schema: &str) -> Result<Schema, Error> {
    match parse_source(source).ok_or_else(|| Error::invalid_source(source))? {
        SchemaSource::Database(url) => {
            tracing::info!(database = %crate::util::sanitize_url(url), schema = target_schema, "reading schema");
            let connection = PgConnection::new(url)
                .await
                .map_err(|e| Error::connection(e.to_string()))?;

            let result = introspect_schema(&connection, target_schema)
                .await
                .map_err(|e| Error::introspection(e.to_string()));
            connection.close().await;
            result
        }
        SchemaSource::Snapshot(path) => {
            tracing::info!(snapshot = %path.display(), "reading schema snapshot");
            load_snapshot(path).map_err(|e| Error::snapshot(e.to_string()))
        }
    }
}

/// Compares two in-memory schemas. Never fails.
pub fn compare_schemas(old: &Schema, new: &Schema) -> CompareResult {
    let operations = compute_diff(old, new);
    let outcome = generate_script(&operations);

    CompareResult {
        operations,
        outcome,
        old_fingerprint: old.fingerprint(),
        new_fingerprint: new.fingerprint(),
    }
}

/// Read both sources and compute the update script that turns old into new.
pub async fn compare(options: CompareOptions) -> Result<CompareResult, Error> {
    let old = read_schema(&options.old_source, &options.target_schema).await?;
    let new = read_schema(&options.new_source, &options.target_schema).await?;

    let result = compare_schemas(&old, &new);
    tracing::info!(
        old_fingerprint = %result.old_fingerprint,
        new_fingerprint = %result.new_fingerprint,
        operations = result.operations.len(),
        "compared schemas"
    );

    Ok(result)
}

/// Read one source into a schema snapshot.
pub async fn snapshot(options: SnapshotOptions) -> Result<SnapshotResult, Error> {
    let schema = read_schema(&options.source, &options.target_schema).await?;
    let fingerprint = schema.fingerprint();
    tracing::info!(fingerprint = %fingerprint, tables = schema.tables.len(), "captured snapshot");

    Ok(SnapshotResult {
        schema,
        fingerprint,
    })
}

fn create_runtime() -> Result<tokio::runtime::Runtime, Error> {
    tokio::runtime::Runtime::new().map_err(|e| Error::runtime(e.to_string()))
}

/// Blocking variant of [`compare`].
pub fn compare_blocking(options: CompareOptions) -> Result<CompareResult, Error> {
    create_runtime()?.block_on(compare(options))
}

/// Blocking variant of [`snapshot`].
pub fn snapshot_blocking(options: SnapshotOptions) -> Result<SnapshotResult, Error> {
    create_runtime()?.block_on(snapshot(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Table;
    use crate::provider::save_snapshot;
    use tempfile::TempDir;

    #[test]
    fn compare_schemas_of_identical_input_is_empty() {
        let mut schema = Schema::new();
        schema
            .tables
            .insert("orders".to_string(), Table::new("orders"));

        let result = compare_schemas(&schema, &schema.clone());
        assert!(result.is_empty());
        assert!(result.operations.is_empty());
        assert_eq!(result.old_fingerprint, result.new_fingerprint);
    }

    #[test]
    fn compare_reads_snapshots() {
        let dir = TempDir::new().unwrap();
        let old_path = dir.path().join("old.json");
        let new_path = dir.path().join("new.json");

        save_snapshot(&Schema::new(), &old_path).unwrap();
        let mut new = Schema::new();
        new.tables.insert("orders".to_string(), Table::new("orders"));
        save_snapshot(&new, &new_path).unwrap();

        let result = compare_blocking(CompareOptions::new(
            old_path.to_string_lossy(),
            format!("json:{}", new_path.display()),
        ))
        .unwrap();

        assert_eq!(result.operations.len(), 1);
        assert!(!result.is_empty());
    }

    #[test]
    fn compare_rejects_unknown_source() {
        let err = compare_blocking(CompareOptions::new("schema.sql", "other.sql")).unwrap_err();
        assert!(matches!(err, Error::InvalidSource { schema_source } if schema_source == "schema.sql"));
    }

    #[test]
    fn snapshot_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let err = snapshot_blocking(SnapshotOptions::new(missing.to_string_lossy())).unwrap_err();
        assert!(matches!(err, Error::Snapshot { .. }));
    }
}
