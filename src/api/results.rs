use crate::diff::MigrationOp;
use crate::model::Schema;
use crate::pg::sqlgen::ScriptOutcome;

/// Result of comparing two schemas.
#[derive(Debug, Clone)]
pub struct CompareResult {
    /// Differences in pass order
    pub operations: Vec<MigrationOp>,
    /// Rendered script, or the no-differences sentinel
    pub outcome: ScriptOutcome,
    pub old_fingerprint: String,
    pub new_fingerprint: String,
}

impl CompareResult {
    pub fn is_empty(&self) -> bool {
        self.outcome.is_empty()
    }
}

/// Result of capturing a schema.
#[derive(Debug, Clone)]
pub struct SnapshotResult {
    pub schema: Schema,
    pub fingerprint: String,
}
