use crate::domain::schema_diff::SchemaDiff;
use crate::error::Result;
use async_trait::async_trait;

/// Port: raw schema text retrieval (implemented by FileSource, GitSource)
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Returns the document text identified by `locator` (a path, a revision…).
    async fn load(&self, locator: &str) -> Result<String>;

    /// Short human-readable name used in logs.
    fn kind(&self) -> &'static str;
}

/// Port: output formatting (implemented by TextWriter, JsonWriter)
pub trait OutputWriter: Send + Sync {
    /// Renders the diff to a string (text report, JSON, etc.)
    fn format(&self, diff: &SchemaDiff) -> Result<String>;
}
