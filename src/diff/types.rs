use crate::model::{Column, ForeignKey, Table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOp {
    DropForeignKey {
        table: String,
        foreign_key: ForeignKey,
    },
    DropTable(String),
    CreateTable(Table),
    DropColumn {
        table: String,
        column: String,
    },
    AddColumn {
        table: String,
        column: Column,
    },
    AlterColumn {
        table: String,
        from: Column,
        to: Column,
    },
    ReplacePrimaryKey {
        table: String,
        from: Vec<String>,
        to: Vec<String>,
    },
    AddForeignKey {
        table: String,
        foreign_key: ForeignKey,
    },
}

/// Which of the three script sections an operation is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpPhase {
    ForeignKeyDrops,
    Body,
    ForeignKeyAdds,
}

impl MigrationOp {
    pub fn phase(&self) -> OpPhase {
        match self {
            MigrationOp::DropForeignKey { .. } => OpPhase::ForeignKeyDrops,
            MigrationOp::AddForeignKey { .. } => OpPhase::ForeignKeyAdds,
            _ => OpPhase::Body,
        }
    }

    /// Name of the table the operation applies to.
    pub fn table(&self) -> &str {
        match self {
            MigrationOp::DropTable(name) => name,
            MigrationOp::CreateTable(table) => &table.name,
            MigrationOp::DropForeignKey { table, .. }
            | MigrationOp::DropColumn { table, .. }
            | MigrationOp::AddColumn { table, .. }
            | MigrationOp::AlterColumn { table, .. }
            | MigrationOp::ReplacePrimaryKey { table, .. }
            | MigrationOp::AddForeignKey { table, .. } => table,
        }
    }
}

/// The sub-changes of an altered column. The type is always restated, so only
/// nullability and default are tracked as optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChanges {
    pub nullable: Option<bool>,
    /// `Some(None)` drops the default, `Some(Some(expr))` sets a new one.
    pub default: Option<Option<String>>,
}

impl ColumnChanges {
    pub fn between(from: &Column, to: &Column) -> Self {
        ColumnChanges {
            nullable: if from.nullable != to.nullable {
                Some(to.nullable)
            } else {
                None
            },
            default: if from.default != to.default {
                Some(to.default.clone())
            } else {
                None
            },
        }
    }
}
