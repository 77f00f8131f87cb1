pub const DEFAULT_TARGET_SCHEMA: &str = "public";

/// Options for comparing two schema sources.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Source describing the current structure (database URL or JSON snapshot)
    pub old_source: String,
    /// Source describing the desired structure
    pub new_source: String,
    /// PostgreSQL schema read from live databases (default: "public")
    pub target_schema: String,
}

impl CompareOptions {
    /// Create new compare options with required fields.
    pub fn new(old_source: impl Into<String>, new_source: impl Into<String>) -> Self {
        Self {
            old_source: old_source.into(),
            new_source: new_source.into(),
            target_schema: DEFAULT_TARGET_SCHEMA.into(),
        }
    }

    /// Set the PostgreSQL schema to read.
    pub fn with_target_schema(mut self, schema: impl Into<String>) -> Self {
        self.target_schema = schema.into();
        self
    }
}

/// Options for capturing a schema snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    pub source: String,
    pub target_schema: String,
}

impl SnapshotOptions {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target_schema: DEFAULT_TARGET_SCHEMA.into(),
        }
    }

    pub fn with_target_schema(mut self, schema: impl Into<String>) -> Self {
        self.target_schema = schema.into();
        self
    }
}
