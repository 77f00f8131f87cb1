use crate::model::*;
use crate::pg::connection::PgConnection;
use crate::util::{Result, SchemaError};
use sqlx::Row;
use std::collections::BTreeMap;

/// Reads the base tables of `target_schema` with their columns, primary keys and foreign keys.
///
/// Values are kept exactly as the catalog reports them: default expressions are
/// not normalized and lengths, precision and scale are taken verbatim.
pub async fn introspect_schema(connection: &PgConnection, target_schema: &str) -> Result<Schema> {
    let mut schema = Schema::new();
    schema.tables = introspect_tables(connection, target_schema).await?;

    for (table_name, columns) in introspect_columns(connection, target_schema).await? {
        if let Some(table) = schema.tables.get_mut(&table_name) {
            table.columns = columns;
        }
    }

    for (table_name, primary_key) in introspect_primary_keys(connection, target_schema).await? {
        if let Some(table) = schema.tables.get_mut(&table_name) {
            table.primary_key = primary_key;
        }
    }

    for (table_name, foreign_keys) in introspect_foreign_keys(connection, target_schema).await? {
        if let Some(table) = schema.tables.get_mut(&table_name) {
            table.foreign_keys = foreign_keys;
        }
    }

    tracing::info!(
        schema = target_schema,
        tables = schema.tables.len(),
        "introspected schema"
    );

    Ok(schema)
}

async fn introspect_tables(
    connection: &PgConnection,
    target_schema: &str,
) -> Result<BTreeMap<String, Table>> {
    let rows = sqlx::query(
        r#"
        SELECT table_name::text AS table_name
        FROM information_schema.tables
        WHERE table_schema = $1 AND table_type = 'BASE TABLE'
        "#,
    )
    .bind(target_schema)
    .fetch_all(connection.pool())
    .await
    .map_err(|e| SchemaError::DatabaseError(format!("Failed to fetch tables: {e}")))?;

    tracing::debug!(rows = rows.len(), "fetched tables");

    let mut tables = BTreeMap::new();
    for row in rows {
        let name: String = row.get("table_name");
        tables.insert(name.clone(), Table::new(name));
    }

    Ok(tables)
}

async fn introspect_columns(
    connection: &PgConnection,
    target_schema: &str,
) -> Result<BTreeMap<String, Vec<Column>>> {
    let rows = sqlx::query(
        r#"
        SELECT c.table_name::text AS table_name,
               c.column_name::text AS column_name,
               c.data_type::text AS data_type,
               c.udt_name::text AS udt_name,
               c.character_maximum_length::int4 AS character_maximum_length,
               c.numeric_precision::int4 AS numeric_precision,
               c.numeric_scale::int4 AS numeric_scale,
               c.is_nullable::text AS is_nullable,
               c.column_default::text AS column_default
        FROM information_schema.columns c
        WHERE c.table_schema = $1
        ORDER BY c.table_name, c.ordinal_position
        "#,
    )
    .bind(target_schema)
    .fetch_all(connection.pool())
    .await
    .map_err(|e| SchemaError::DatabaseError(format!("Failed to fetch columns: {e}")))?;

    tracing::debug!(rows = rows.len(), "fetched columns");

    let mut columns: BTreeMap<String, Vec<Column>> = BTreeMap::new();
    for row in rows {
        let table_name: String = row.get("table_name");
        let data_type: String = row.get("data_type");
        let udt_name: String = row.get("udt_name");
        let is_nullable: String = row.get("is_nullable");

        columns.entry(table_name).or_default().push(Column {
            name: row.get("column_name"),
            data_type: map_data_type(&data_type, &udt_name),
            max_length: row.get("character_maximum_length"),
            numeric_precision: row.get("numeric_precision"),
            numeric_scale: row.get("numeric_scale"),
            nullable: is_nullable == "YES",
            default: row.get("column_default"),
        });
    }

    Ok(columns)
}

/// information_schema reports enums and domains as `USER-DEFINED` and arrays as
/// `ARRAY`; the underlying udt name is the usable type in those cases.
fn map_data_type(data_type: &str, udt_name: &str) -> String {
    match data_type {
        "USER-DEFINED" => udt_name.to_string(),
        "ARRAY" => format!("{}[]", udt_name.strip_prefix('_').unwrap_or(udt_name)),
        _ => data_type.to_string(),
    }
}

async fn introspect_primary_keys(
    connection: &PgConnection,
    target_schema: &str,
) -> Result<BTreeMap<String, Vec<String>>> {
    let rows = sqlx::query(
        r#"
        SELECT kcu.table_name::text AS table_name,
               kcu.column_name::text AS column_name
        FROM information_schema.table_constraints tc
        JOIN information_schema.key_column_usage kcu
            ON tc.constraint_schema = kcu.constraint_schema
            AND tc.constraint_name = kcu.constraint_name
            AND tc.table_name = kcu.table_name
        WHERE tc.constraint_type = 'PRIMARY KEY'
            AND tc.table_schema = $1
        ORDER BY kcu.table_name, kcu.ordinal_position
        "#,
    )
    .bind(target_schema)
    .fetch_all(connection.pool())
    .await
    .map_err(|e| SchemaError::DatabaseError(format!("Failed to fetch primary keys: {e}")))?;

    tracing::debug!(rows = rows.len(), "fetched primary key columns");

    let mut primary_keys: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in rows {
        let table_name: String = row.get("table_name");
        primary_keys
            .entry(table_name)
            .or_default()
            .push(row.get("column_name"));
    }

    Ok(primary_keys)
}

async fn introspect_foreign_keys(
    connection: &PgConnection,
    target_schema: &str,
) -> Result<BTreeMap<String, Vec<ForeignKey>>> {
    let rows = sqlx::query(
        r#"
        SELECT cl.relname::text AS table_name,
               att.attname::text AS column_name,
               ref_cl.relname::text AS referenced_table,
               ref_att.attname::text AS referenced_column,
               con.conname::text AS constraint_name
        FROM pg_constraint con
        JOIN pg_class cl ON cl.oid = con.conrelid
        JOIN pg_namespace ns ON ns.oid = cl.relnamespace
        JOIN pg_class ref_cl ON ref_cl.oid = con.confrelid
        CROSS JOIN LATERAL unnest(con.conkey, con.confkey)
            WITH ORDINALITY AS keys(attnum, ref_attnum, ord)
        JOIN pg_attribute att
            ON att.attrelid = con.conrelid AND att.attnum = keys.attnum
        JOIN pg_attribute ref_att
            ON ref_att.attrelid = con.confrelid AND ref_att.attnum = keys.ref_attnum
        WHERE con.contype = 'f'
            AND ns.nspname = $1
        ORDER BY cl.relname, con.conname, keys.ord
        "#,
    )
    .bind(target_schema)
    .fetch_all(connection.pool())
    .await
    .map_err(|e| SchemaError::DatabaseError(format!("Failed to fetch foreign keys: {e}")))?;

    tracing::debug!(rows = rows.len(), "fetched foreign key columns");

    let mut foreign_keys: BTreeMap<String, Vec<ForeignKey>> = BTreeMap::new();
    for row in rows {
        let table_name: String = row.get("table_name");
        let foreign_key = ForeignKey {
            name: row.get("constraint_name"),
            column: row.get("column_name"),
            referenced_table: row.get("referenced_table"),
            referenced_column: row.get("referenced_column"),
        };

        let table_keys = foreign_keys.entry(table_name.clone()).or_default();
        // Multi-column keys come back as one row per column pair; only the first pair is modelled.
        if table_keys.iter().any(|fk| fk.name == foreign_key.name) {
            tracing::warn!(
                table = %table_name,
                constraint = %foreign_key.name,
                "composite foreign key reduced to its first column"
            );
            continue;
        }
        table_keys.push(foreign_key);
    }

    Ok(foreign_keys)
}
