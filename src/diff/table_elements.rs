use super::MigrationOp;
use crate::model::Table;

pub(super) fn diff_columns(from_table: &Table, to_table: &Table) -> Vec<MigrationOp> {
    let mut ops = Vec::new();

    for column in &from_table.columns {
        if to_table.column(&column.name).is_none() {
            ops.push(MigrationOp::DropColumn {
                table: from_table.name.clone(),
                column: column.name.clone(),
            });
        }
    }

    for column in &to_table.columns {
        if from_table.column(&column.name).is_none() {
            ops.push(MigrationOp::AddColumn {
                table: to_table.name.clone(),
                column: column.clone(),
            });
        }
    }

    for column in &to_table.columns {
        if let Some(from_column) = from_table.column(&column.name) {
            if !from_column.structurally_equal(column) {
                ops.push(MigrationOp::AlterColumn {
                    table: to_table.name.clone(),
                    from: from_column.clone(),
                    to: column.clone(),
                });
            }
        }
    }

    ops
}

pub(super) fn diff_primary_key(from_table: &Table, to_table: &Table) -> Option<MigrationOp> {
    if from_table.primary_key == to_table.primary_key {
        return None;
    }

    Some(MigrationOp::ReplacePrimaryKey {
        table: to_table.name.clone(),
        from: from_table.primary_key.clone(),
        to: to_table.primary_key.clone(),
    })
}

/// Foreign keys of `from_table` whose constraint name no longer exists in `to_table`.
pub(super) fn dropped_foreign_keys(from_table: &Table, to_table: &Table) -> Vec<MigrationOp> {
    from_table
        .foreign_keys
        .iter()
        .filter(|fk| to_table.foreign_key(&fk.name).is_none())
        .map(|fk| MigrationOp::DropForeignKey {
            table: from_table.name.clone(),
            foreign_key: fk.clone(),
        })
        .collect()
}

/// Foreign keys of `to_table` missing from `from_table`. Every key counts as
/// added when the table did not exist before.
pub(super) fn added_foreign_keys(from_table: Option<&Table>, to_table: &Table) -> Vec<MigrationOp> {
    to_table
        .foreign_keys
        .iter()
        .filter(|fk| from_table.and_then(|t| t.foreign_key(&fk.name)).is_none())
        .map(|fk| MigrationOp::AddForeignKey {
            table: to_table.name.clone(),
            foreign_key: fk.clone(),
        })
        .collect()
}
