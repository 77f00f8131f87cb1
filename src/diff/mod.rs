//! Structural comparison of two schema snapshots.
//!
//! [`compute_diff`] returns the operations grouped by pass: dropped foreign keys,
//! dropped tables, created tables, per-table column and primary key changes, and
//! finally added foreign keys. Comparison never fails: a missing table or column
//! is a difference, not an error.

mod table_elements;
mod types;

pub use types::{ColumnChanges, MigrationOp, OpPhase};

use crate::model::Schema;
use table_elements::{added_foreign_keys, diff_columns, diff_primary_key, dropped_foreign_keys};

pub fn compute_diff(from: &Schema, to: &Schema) -> Vec<MigrationOp> {
    let mut ops = Vec::new();

    ops.extend(diff_dropped_foreign_keys(from, to));
    ops.extend(diff_tables(from, to));

    for (name, to_table) in &to.tables {
        if let Some(from_table) = from.table(name) {
            ops.extend(diff_columns(from_table, to_table));
            ops.extend(diff_primary_key(from_table, to_table));
        }
    }

    ops.extend(diff_added_foreign_keys(from, to));

    ops
}

/// Tables that disappear entirely are skipped: their constraints go with the
/// cascading table drop.
fn diff_dropped_foreign_keys(from: &Schema, to: &Schema) -> Vec<MigrationOp> {
    let mut ops = Vec::new();

    for (name, from_table) in &from.tables {
        if let Some(to_table) = to.table(name) {
            ops.extend(dropped_foreign_keys(from_table, to_table));
        }
    }

    ops
}

fn diff_tables(from: &Schema, to: &Schema) -> Vec<MigrationOp> {
    let mut ops = Vec::new();

    for name in from.tables.keys() {
        if to.table(name).is_none() {
            ops.push(MigrationOp::DropTable(name.clone()));
        }
    }

    for (name, table) in &to.tables {
        if from.table(name).is_none() {
            ops.push(MigrationOp::CreateTable(table.clone()));
        }
    }

    ops
}

fn diff_added_foreign_keys(from: &Schema, to: &Schema) -> Vec<MigrationOp> {
    let mut ops = Vec::new();

    for (name, to_table) in &to.tables {
        ops.extend(added_foreign_keys(from.table(name), to_table));
    }

    ops
}
