use crate::domain::schema_diff::SchemaDiff;
use crate::domain::value_objects::Fingerprint;
use colored::*;
use tabled::settings::{object::Columns, Alignment, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TableRow {
    table: String,
    change: String,
    #[tabled(rename = "+ fields")]
    created: String,
    #[tabled(rename = "~ fields")]
    updated: String,
    #[tabled(rename = "- fields")]
    deleted: String,
}

#[derive(Tabled)]
struct SummaryRow {
    metric: String,
    value: String,
}

/// Render a compact overview of `diff`: one row per changed table, then the
/// totals. Colour follows `colored`'s global switch.
pub fn render_summary(diff: &SchemaDiff, old_fp: &Fingerprint, new_fp: &Fingerprint) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "BASEDIFF SUMMARY".bold().cyan()));
    out.push_str(&format!("Base: {}\n", diff.base_id.bright_yellow()));
    out.push_str(&format!(
        "{} → {}\n\n",
        old_fp.short().blue(),
        new_fp.short().green()
    ));

    let s = diff.summary();
    if s.is_empty() {
        out.push_str(&format!("{}\n", "No changes detected.".italic()));
        return out;
    }

    let mut rows: Vec<TableRow> = Vec::new();
    for t in &diff.tables.created {
        rows.push(TableRow {
            table: t.name.bold().to_string(),
            change: "new".green().to_string(),
            created: t.fields.len().to_string().green().to_string(),
            updated: "0".to_string(),
            deleted: "0".to_string(),
        });
    }
    for t in &diff.tables.updated {
        let (c, u, d) = t
            .fields
            .as_ref()
            .map(|f| (f.created.len(), f.updated.len(), f.deleted.len()))
            .unwrap_or_default();
        rows.push(TableRow {
            table: t.table.name.bold().to_string(),
            change: "modified".yellow().to_string(),
            created: c.to_string().green().to_string(),
            updated: u.to_string().yellow().to_string(),
            deleted: d.to_string().red().to_string(),
        });
    }
    for t in &diff.tables.deleted {
        rows.push(TableRow {
            table: t.name.bold().to_string(),
            change: "removed".red().to_string(),
            created: "0".to_string(),
            updated: "0".to_string(),
            deleted: t.fields.len().to_string().red().to_string(),
        });
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..=4)).with(Alignment::right()))
        .to_string();
    out.push_str(&table);
    out.push('\n');

    let summary_rows = vec![
        SummaryRow {
            metric: "Tables created".into(),
            value: s.tables_created.to_string().green().to_string(),
        },
        SummaryRow {
            metric: "Tables modified".into(),
            value: s.tables_updated.to_string().yellow().to_string(),
        },
        SummaryRow {
            metric: "Tables removed".into(),
            value: s.tables_deleted.to_string().red().to_string(),
        },
        SummaryRow {
            metric: "Fields created".into(),
            value: s.fields_created.to_string().green().to_string(),
        },
        SummaryRow {
            metric: "Fields modified".into(),
            value: s.fields_updated.to_string().yellow().to_string(),
        },
        SummaryRow {
            metric: "Fields removed".into(),
            value: s.fields_deleted.to_string().red().to_string(),
        },
        SummaryRow {
            metric: "Total changes".into(),
            value: s.total_changes().to_string().bold().to_string(),
        },
    ];

    let summary_table = Table::new(summary_rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..=1)).with(Alignment::right()))
        .to_string();

    out.push('\n');
    out.push_str(&summary_table);
    out.push('\n');
    out
}

pub fn print_summary(diff: &SchemaDiff, old_fp: &Fingerprint, new_fp: &Fingerprint) {
    println!();
    print!("{}", render_summary(diff, old_fp, new_fp));
    println!();
}
