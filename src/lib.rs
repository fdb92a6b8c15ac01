pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// ─── Log level ────────────────────────────────────────────────────────────────

/// Controls the verbosity of basediff's internal tracing output.
///
/// Pass to [`init_tracing`] before loading any schema.
///
/// | Variant | `tracing` level | When to use                               |
/// |---------|-----------------|-------------------------------------------|
/// | `Error` | `error`         | `--quiet` / CI scripting                  |
/// | `Warn`  | `warn`          | Default: only the report reaches the user |
/// | `Info`  | `info`          | Shows loading steps                       |
/// | `Debug` | `debug`         | `--verbose`: per-table change counts too  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
}

/// Initialise the global `tracing` subscriber for basediff.
///
/// Logs go to stderr so stdout only ever carries the rendered diff. Respects
/// `RUST_LOG` when set, falling back to `level` otherwise.
///
/// Call this **once** at application startup. Library consumers who manage
/// their own subscriber should skip this and configure tracing themselves.
///
/// Only available when the `cli` feature is enabled (pulls in
/// `tracing-subscriber`).
#[cfg(feature = "cli")]
pub fn init_tracing(level: LogLevel) {
    let default_filter = match level {
        LogLevel::Error => "basediff=error",
        LogLevel::Warn => "basediff=warn",
        LogLevel::Info => "basediff=info",
        LogLevel::Debug => "basediff=debug",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

// ─── Public API Facade ───

pub use domain::fingerprint::fingerprint;
pub use domain::ports::{OutputWriter, SchemaSource};
pub use domain::schema::{Base, Entity, Field, FieldOptions, Table};
pub use domain::schema_diff::{
    DiffSummary, FieldChange, FieldSetDiff, FieldUpdate, SchemaDiff, TableChangeKind, TableChanges,
    TableDiff,
};
pub use domain::value_objects::Fingerprint;
pub use error::{DiffError, Result};
pub use infrastructure::config::{AppConfig, GitConfig, OutputConfig, OutputFormat, ThemeConfig};
pub use infrastructure::source::{load_base, parse_base, FileSource, GitSource};
pub use infrastructure::validation::{validate, Violation};
pub use presentation::colorize::{colorize, Palette};

use crate::application::diff::SchemaDiffEngine;
use crate::presentation::writers::writer_for;

// ─── Public entry points ───

/// Compare two snapshots of a base.
///
/// Both must already be structurally valid (see [`parse_base`]). Pure and
/// synchronous; safe to call from many threads at once.
pub fn compare(old: &Base, new: &Base) -> Result<SchemaDiff> {
    SchemaDiffEngine::new().compare(old, new)
}

/// Render a diff as configured: JSON, plain text, or text coloured with
/// `palette`.
pub fn render(diff: &SchemaDiff, output: &OutputConfig, palette: Palette) -> Result<String> {
    writer_for(output, palette).format(diff)
}

/// Load both snapshots concurrently from `source` and compare them.
///
/// Either side failing to load, parse or validate aborts the comparison.
pub async fn diff_sources(
    source: &dyn SchemaSource,
    old_locator: &str,
    new_locator: &str,
) -> Result<(Base, Base, SchemaDiff)> {
    let (old, new) = tokio::join!(
        load_base(source, "old", old_locator),
        load_base(source, "new", new_locator)
    );
    let (old, new) = (old?, new?);
    let diff = compare(&old, &new)?;
    Ok((old, new, diff))
}
