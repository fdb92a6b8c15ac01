//! # Basediff: library usage example
//!
//! Shows three common patterns for consuming Basediff as a Rust library:
//!
//! 1. **From two files**: simplest, mirrors `basediff diff`
//! 2. **Programmatic bases**: build `Base` values in code, no files needed
//! 3. **Inspect the diff**: traverse the result for custom logic
//!
//! Run with two schema files:
//!   cargo run --example diff_as_lib -- old.json new.json
//!
//! Run with the built-in bases:
//!   cargo run --example diff_as_lib

use anyhow::Result;
use basediff::{
    AppConfig, Base, Field, FileSource, OutputConfig, OutputFormat, Palette, SchemaDiff, Table,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    match (args.get(1), args.get(2)) {
        (Some(old), Some(new)) => from_files(old, new).await,
        _ => programmatic_bases(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern 1: load both snapshots from disk (same as the CLI does internally)
// ─────────────────────────────────────────────────────────────────────────────
async fn from_files(old: &str, new: &str) -> Result<()> {
    println!("=== Pattern 1: from files ({old} → {new}) ===\n");

    let cfg = AppConfig::load(None)?;
    let (_, _, diff) = basediff::diff_sources(&FileSource, old, new).await?;

    let output = basediff::render(&diff, &cfg.output, cfg.theme.palette()?)?;
    println!("{output}");

    inspect(&diff);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern 2: build the bases entirely in code.
// Useful when snapshots come from an API response, a database row, etc.
// ─────────────────────────────────────────────────────────────────────────────
fn programmatic_bases() -> Result<()> {
    println!("=== Pattern 2: programmatic bases ===\n");

    let old = Base::new(
        "appDemo",
        vec![Table::new(
            "tblCustomers",
            "Customers",
            vec![
                Field::new("fldEmail", "Email", "email"),
                Field::new("fldTier", "Tier", "singleSelect")
                    .with_option("choices", json!(["gold", "silver"])),
            ],
        )],
    );

    let new = Base::new(
        "appDemo",
        vec![
            Table::new(
                "tblCustomers",
                "Customers",
                vec![
                    Field::new("fldEmail", "E-mail", "email")
                        .with_description("Primary contact address"),
                    Field::new("fldTier", "Tier", "singleSelect")
                        .with_option("choices", json!(["gold", "silver", "bronze"])),
                ],
            ),
            Table::new(
                "tblOrders",
                "Orders",
                vec![Field::new("fldTotal", "Total", "currency").with_option("symbol", json!("€"))],
            ),
        ],
    );

    let diff = basediff::compare(&old, &new)?;

    let text = OutputConfig {
        format: OutputFormat::Text,
        color: true,
    };
    println!("{}", basediff::render(&diff, &text, Palette::default())?);

    let json = OutputConfig {
        format: OutputFormat::Json,
        color: false,
    };
    println!("{}", basediff::render(&diff, &json, Palette::default())?);

    inspect(&diff);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern 3: walk the diff yourself
// ─────────────────────────────────────────────────────────────────────────────
fn inspect(diff: &SchemaDiff) {
    println!("\n=== Pattern 3: inspect the diff ===\n");

    let summary = diff.summary();
    println!(
        "{} change(s): {} new table(s), {} modified, {} removed",
        summary.total_changes(),
        summary.tables_created,
        summary.tables_updated,
        summary.tables_deleted
    );

    for table in &diff.tables.updated {
        let Some(fields) = &table.fields else { continue };
        for update in &fields.updated {
            for change in &update.changes {
                println!("{}.{}: {change}", table.table.name, update.new.name);
            }
        }
    }
}
