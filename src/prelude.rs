//! Convenient re-exports for common comparadb usage.
//!
//! # Example
//!
//! ```no_run
//! use comparadb::prelude::*;
//!
//! let result = compare_blocking(CompareOptions::new("old.json", "new.json")).unwrap();
//! println!("Found {} differences", result.operations.len());
//! ```

// Async functions
pub use crate::api::{compare, snapshot};

// Blocking functions
pub use crate::api::{compare_blocking, snapshot_blocking};

// Options and results
pub use crate::api::{CompareOptions, CompareResult, SnapshotOptions, SnapshotResult};

// Error types
pub use crate::api::Error;

// Core types
pub use crate::api::compare_schemas;
pub use crate::diff::{compute_diff, MigrationOp};
pub use crate::model::{Column, ForeignKey, Schema, Table};
pub use crate::pg::sqlgen::{generate_script, Script, ScriptOutcome, StatementGroup};
