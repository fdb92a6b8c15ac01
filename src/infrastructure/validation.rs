//! Structural validation of base schema documents.
//!
//! Documents are checked against an embedded JSON Schema before they are
//! deserialized and handed to the diff engine. Every violation is collected,
//! not just the first one, so a user can fix a file in one pass.

use jsonschema::Validator;
use serde_json::Value;
use std::sync::OnceLock;

use crate::error::{DiffError, Result};

/// Embedded JSON Schema describing a base: tables need `id`, `name` and
/// `fields`; fields need `id`, `name` and `type`; `options` is an open map.
const BASE_SCHEMA: &str = include_str!("base_schema.json");

/// Compiled validator (initialized on first use)
static COMPILED_SCHEMA: OnceLock<std::result::Result<Validator, String>> = OnceLock::new();

/// One failed rule of the structural contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// JSON pointer to the offending value (`""` is the document root).
    pub instance_path: String,
    /// JSON pointer to the schema keyword that failed.
    pub schema_path: String,
    pub message: String,
    pub value: Value,
}

fn validator() -> Result<&'static Validator> {
    let compiled = COMPILED_SCHEMA.get_or_init(|| {
        let schema: Value = serde_json::from_str(BASE_SCHEMA)
            .map_err(|e| format!("Failed to parse embedded schema: {e}"))?;
        jsonschema::validator_for(&schema).map_err(|e| format!("Schema compilation error: {e}"))
    });
    compiled.as_ref().map_err(|message| DiffError::config(message.clone()))
}

/// Check `document` against the base contract and return every violation.
///
/// An empty vector means the document is valid.
pub fn validate(document: &Value) -> Result<Vec<Violation>> {
    let validator = validator()?;
    Ok(validator
        .iter_errors(document)
        .map(|error| Violation {
            instance_path: error.instance_path.to_string(),
            schema_path: error.schema_path.to_string(),
            message: error.to_string(),
            value: error.instance.clone().into_owned(),
        })
        .collect())
}

/// Render violations one per line:
/// `- <instance path>: <message> (rule: <schema path>, value: <json>)`.
pub fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| {
            let path = if v.instance_path.is_empty() {
                "/"
            } else {
                v.instance_path.as_str()
            };
            format!(
                "- {path}: {} (rule: {}, value: {})",
                v.message,
                v.schema_path,
                truncate(&v.value.to_string(), 120)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate and turn a failure into [`DiffError::Invalid`].
pub fn ensure_valid(label: &str, document: &Value) -> Result<()> {
    let violations = validate(document)?;
    if violations.is_empty() {
        return Ok(());
    }
    Err(DiffError::Invalid {
        label: label.to_string(),
        violation_count: violations.len(),
        report: format_violations(&violations),
    })
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let head: String = s.chars().take(max_chars).collect();
    format!("{head}…")
}
