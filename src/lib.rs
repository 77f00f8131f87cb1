//! comparadb - compare two PostgreSQL schemas and generate an update script.
//!
//! The pipeline reads two schema snapshots, computes their structural
//! differences and renders them as DDL in a dependency-safe order: foreign
//! key drops first, then table and column changes, then foreign key additions.
//!
//! # Quick Start
//!
//! ```no_run
//! use comparadb::prelude::*;
//!
//! let old = Schema::new();
//! let new = Schema::new();
//!
//! match generate_script(&compute_diff(&old, &new)) {
//!     ScriptOutcome::NoDifferences => println!("nothing to do"),
//!     ScriptOutcome::Changes(script) => print!("{}", script.render()),
//! }
//! ```
//!
//! # Modules
//!
//! - [`model`] - Schema snapshot types (Table, Column, ForeignKey)
//! - [`diff`] - Schema comparison
//! - [`pg`] - PostgreSQL introspection and script generation
//! - [`api`] - High-level API mirroring CLI commands
//! - [`sink`] - Writing scripts to disk

pub mod api;
pub mod config;
pub mod diff;
pub mod model;
pub mod pg;
pub mod prelude;
pub mod provider;
pub mod sink;
pub mod util;
