use crate::diff::{ColumnChanges, MigrationOp, OpPhase};
use crate::model::{Column, ForeignKey, Table};

/// The statements rendered for one changed object, preceded by a comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementGroup {
    pub phase: OpPhase,
    pub table: String,
    /// Column or constraint the group targets, if narrower than the table.
    pub object: Option<String>,
    pub comment: String,
    pub statements: Vec<String>,
}

impl StatementGroup {
    pub fn render(&self) -> String {
        let mut out = format!("-- {}\n", self.comment);
        for statement in &self.statements {
            out.push_str(statement);
            out.push('\n');
        }
        out
    }
}

/// A migration script split into its three ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub foreign_key_drops: Vec<StatementGroup>,
    pub body: Vec<StatementGroup>,
    pub foreign_key_adds: Vec<StatementGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    NoDifferences,
    Changes(Script),
}

impl Script {
    pub fn is_empty(&self) -> bool {
        self.foreign_key_drops.is_empty() && self.body.is_empty() && self.foreign_key_adds.is_empty()
    }

    pub fn groups(&self) -> impl Iterator<Item = &StatementGroup> {
        self.foreign_key_drops
            .iter()
            .chain(&self.body)
            .chain(&self.foreign_key_adds)
    }

    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.groups()
            .flat_map(|group| group.statements.iter().map(String::as_str))
    }

    /// Renders every non-empty section followed by a blank line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in [&self.foreign_key_drops, &self.body, &self.foreign_key_adds] {
            if section.is_empty() {
                continue;
            }
            for group in section {
                out.push_str(&group.render());
            }
            out.push('\n');
        }
        out
    }
}

impl ScriptOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, ScriptOutcome::NoDifferences)
    }

    pub fn script(&self) -> Option<&Script> {
        match self {
            ScriptOutcome::NoDifferences => None,
            ScriptOutcome::Changes(script) => Some(script),
        }
    }
}

pub fn generate_script(ops: &[MigrationOp]) -> ScriptOutcome {
    let mut script = Script::default();

    for op in ops {
        let group = generate_op_group(op);
        match group.phase {
            OpPhase::ForeignKeyDrops => script.foreign_key_drops.push(group),
            OpPhase::Body => script.body.push(group),
            OpPhase::ForeignKeyAdds => script.foreign_key_adds.push(group),
        }
    }

    if script.is_empty() {
        ScriptOutcome::NoDifferences
    } else {
        ScriptOutcome::Changes(script)
    }
}

/// Flat list of statements in execution order.
pub fn generate_sql(ops: &[MigrationOp]) -> Vec<String> {
    match generate_script(ops) {
        ScriptOutcome::NoDifferences => Vec::new(),
        ScriptOutcome::Changes(script) => script.statements().map(str::to_string).collect(),
    }
}

fn generate_op_group(op: &MigrationOp) -> StatementGroup {
    let table = op.table().to_string();
    let (object, comment, statements) = match op {
        MigrationOp::DropForeignKey { table, foreign_key } => (
            Some(foreign_key.name.clone()),
            format!(
                "Drop foreign key {} from {}",
                format_name(&foreign_key.name),
                format_name(table)
            ),
            vec![format!(
                "ALTER TABLE {} DROP CONSTRAINT IF EXISTS {};",
                format_name(table),
                format_name(&foreign_key.name)
            )],
        ),

        MigrationOp::DropTable(name) => (
            None,
            format!("Drop table {}", format_name(name)),
            vec![format!("DROP TABLE IF EXISTS {} CASCADE;", format_name(name))],
        ),

        MigrationOp::CreateTable(table) => (
            None,
            format!("Create table {}", format_name(&table.name)),
            generate_create_table(table),
        ),

        MigrationOp::DropColumn { table, column } => (
            Some(column.clone()),
            format!(
                "Drop column {} from {}",
                format_name(column),
                format_name(table)
            ),
            vec![format!(
                "ALTER TABLE {} DROP COLUMN IF EXISTS {};",
                format_name(table),
                format_name(column)
            )],
        ),

        MigrationOp::AddColumn { table, column } => (
            Some(column.name.clone()),
            format!(
                "Add column {} to {}",
                format_name(&column.name),
                format_name(table)
            ),
            vec![format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {};",
                format_name(table),
                format_name(&column.name),
                column_definition(column)
            )],
        ),

        MigrationOp::AlterColumn { table, from, to } => (
            Some(to.name.clone()),
            format!(
                "Alter column {} in {}",
                format_name(&to.name),
                format_name(table)
            ),
            generate_alter_column(table, to, &ColumnChanges::between(from, to)),
        ),

        MigrationOp::ReplacePrimaryKey { table, to, .. } => (
            None,
            format!("Update primary key of {}", format_name(table)),
            generate_replace_primary_key(table, to),
        ),

        MigrationOp::AddForeignKey { table, foreign_key } => (
            Some(foreign_key.name.clone()),
            format!(
                "Add foreign key {} to {}",
                format_name(&foreign_key.name),
                format_name(table)
            ),
            vec![generate_add_foreign_key(table, foreign_key)],
        ),
    };

    StatementGroup {
        phase: op.phase(),
        table,
        object,
        comment,
        statements,
    }
}

fn generate_create_table(table: &Table) -> Vec<String> {
    let mut statements = Vec::new();

    let column_defs: Vec<String> = table
        .columns
        .iter()
        .map(|column| format!("    {} {}", format_name(&column.name), column_definition(column)))
        .collect();

    if column_defs.is_empty() {
        statements.push(format!("CREATE TABLE {} (\n);", format_name(&table.name)));
    } else {
        statements.push(format!(
            "CREATE TABLE {} (\n{}\n);",
            format_name(&table.name),
            column_defs.join(",\n")
        ));
    }

    if !table.primary_key.is_empty() {
        statements.push(generate_add_primary_key(&table.name, &table.primary_key));
    }

    statements
}

fn generate_alter_column(table: &str, column: &Column, changes: &ColumnChanges) -> Vec<String> {
    let qualified = format_name(table);
    let column_name = format_name(&column.name);
    let mut statements = vec![format!(
        "ALTER TABLE {} ALTER COLUMN {} TYPE {};",
        qualified,
        column_name,
        type_definition(column)
    )];

    if let Some(nullable) = changes.nullable {
        if nullable {
            statements.push(format!(
                "ALTER TABLE {qualified} ALTER COLUMN {column_name} DROP NOT NULL;"
            ));
        } else {
            statements.push(format!(
                "ALTER TABLE {qualified} ALTER COLUMN {column_name} SET NOT NULL;"
            ));
        }
    }

    if let Some(ref default) = changes.default {
        match default {
            Some(value) => {
                statements.push(format!(
                    "ALTER TABLE {qualified} ALTER COLUMN {column_name} SET DEFAULT {value};"
                ));
            }
            None => {
                statements.push(format!(
                    "ALTER TABLE {qualified} ALTER COLUMN {column_name} DROP DEFAULT;"
                ));
            }
        }
    }

    statements
}

fn generate_replace_primary_key(table: &str, columns: &[String]) -> Vec<String> {
    let mut statements = vec![format!(
        "ALTER TABLE {} DROP CONSTRAINT IF EXISTS {};",
        format_name(table),
        format_name(&format!("{table}_pkey"))
    )];

    if !columns.is_empty() {
        statements.push(generate_add_primary_key(table, columns));
    }

    statements
}

fn generate_add_primary_key(table: &str, columns: &[String]) -> String {
    format!(
        "ALTER TABLE {} ADD PRIMARY KEY ({});",
        format_name(table),
        format_column_list(columns)
    )
}

fn generate_add_foreign_key(table: &str, foreign_key: &ForeignKey) -> String {
    format!(
        "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}({});",
        format_name(table),
        format_name(&foreign_key.name),
        format_name(&foreign_key.column),
        format_name(&foreign_key.referenced_table),
        format_name(&foreign_key.referenced_column)
    )
}

/// Data type with its length. Precision and scale are not rendered.
fn type_definition(column: &Column) -> String {
    match column.max_length {
        Some(length) => format!("{}({length})", column.data_type),
        None => column.data_type.clone(),
    }
}

/// Full column definition used by CREATE TABLE and ADD COLUMN.
pub fn column_definition(column: &Column) -> String {
    let mut parts = vec![type_definition(column)];

    if !column.nullable {
        parts.push("NOT NULL".to_string());
    }

    if let Some(ref default) = column.default {
        parts.push(format!("DEFAULT {default}"));
    }

    parts.join(" ")
}

fn format_column_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format_name(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quotes identifiers that start with an uppercase letter so PostgreSQL keeps
/// their case. Lowercase-leading identifiers are left bare and nothing is escaped.
pub fn format_name(identifier: &str) -> String {
    match identifier.chars().next() {
        Some(first) if first.is_uppercase() => format!("\"{identifier}\""),
        _ => identifier.to_string(),
    }
}
