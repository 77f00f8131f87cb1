pub mod connection;
pub mod introspect;
pub mod sqlgen;

pub use connection::PgConnection;
pub use introspect::introspect_schema;
pub use sqlgen::{generate_script, generate_sql, Script, ScriptOutcome, StatementGroup};
