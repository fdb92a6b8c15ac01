use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, instrument};

use crate::domain::ports::SchemaSource;
use crate::domain::schema::Base;
use crate::error::{DiffError, Result};
use crate::infrastructure::validation::ensure_valid;

/// Reads schema documents from the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct FileSource;

#[async_trait]
impl SchemaSource for FileSource {
    async fn load(&self, locator: &str) -> Result<String> {
        tokio::fs::read_to_string(locator)
            .await
            .map_err(|source| DiffError::Read {
                path: locator.to_string(),
                source,
            })
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}

/// Reads a schema document as it was at a given git revision.
///
/// `locator` is any revision git understands (commit id, branch, tag…); the
/// document is `git show <rev>:<schema_path>` run inside `repo_dir`.
#[derive(Debug, Clone)]
pub struct GitSource {
    repo_dir: PathBuf,
    schema_path: String,
}

impl GitSource {
    pub fn new(repo_dir: impl Into<PathBuf>, schema_path: impl Into<String>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            schema_path: schema_path.into(),
        }
    }

    fn object_spec(&self, revision: &str) -> String {
        format!("{}:{}", revision, self.schema_path.trim_start_matches("./"))
    }
}

#[async_trait]
impl SchemaSource for GitSource {
    async fn load(&self, locator: &str) -> Result<String> {
        let spec = self.object_spec(locator);
        let output = tokio::process::Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .arg("show")
            .arg(&spec)
            .output()
            .await
            .map_err(|e| DiffError::git(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            return Err(DiffError::git(format!(
                "git show {spec} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| DiffError::git(format!("{spec} is not valid UTF-8: {e}")))
    }

    fn kind(&self) -> &'static str {
        "git"
    }
}

/// Parse raw text into a structurally valid [`Base`].
///
/// Fails with [`DiffError::Malformed`] when the text is not JSON and with
/// [`DiffError::Invalid`] when it breaks the base contract.
pub fn parse_base(label: &str, text: &str) -> Result<Base> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| DiffError::malformed(label, e))?;
    ensure_valid(label, &document)?;
    Ok(serde_json::from_value(document)?)
}

/// Load, validate and deserialize one snapshot.
#[instrument(name = "load_base", skip(source), fields(kind = source.kind()), level = "debug")]
pub async fn load_base(source: &dyn SchemaSource, label: &str, locator: &str) -> Result<Base> {
    let text = source.load(locator).await?;
    let base = parse_base(label, &text)?;
    debug!(base.id = %base.id, tables = base.tables.len(), bytes = text.len(), "schema loaded");
    Ok(base)
}
