//! Error types for basediff operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiffError>;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("The {label} schema is not valid JSON: {source}")]
    Malformed {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("The {label} schema file is invalid:\n{report}")]
    Invalid {
        label: String,
        violation_count: usize,
        report: String,
    },

    /// A table classified as updated has no counterpart in the old base.
    /// Matching guarantees this never happens; seeing it means a bug.
    #[error("internal error: updated table {id} not found in the old base")]
    TableNotFound { id: String },

    #[error("Git operation error: {message}")]
    Git { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiffError {
    pub fn malformed(label: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Malformed {
            label: label.into(),
            source,
        }
    }

    pub fn git(msg: impl Into<String>) -> Self {
        Self::Git {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
