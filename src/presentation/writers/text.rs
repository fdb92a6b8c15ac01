use crate::domain::{
    ports::OutputWriter,
    schema::{Field, Table},
    schema_diff::{FieldSetDiff, FieldUpdate, SchemaDiff, TableChangeKind},
};
use crate::error::Result;
use crate::presentation::colorize::{colorize, Palette};

/// Line-oriented report, optionally colourized.
///
/// ```text
/// Base: appXYZ
///
/// + Orders (NEW TABLE)
///   + Total (number)
///
/// ~ Customers (MODIFIED TABLE)
///   ~ E-mail (email)
///     name: Email → E-mail
///
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextWriter {
    palette: Option<Palette>,
}

impl TextWriter {
    /// Plain text, no escape codes.
    pub fn plain() -> Self {
        Self { palette: None }
    }

    pub fn colored(palette: Palette) -> Self {
        Self {
            palette: Some(palette),
        }
    }
}

impl OutputWriter for TextWriter {
    fn format(&self, diff: &SchemaDiff) -> Result<String> {
        let report = render_report(diff);
        Ok(match &self.palette {
            Some(palette) => colorize(&report, palette),
            None => report,
        })
    }
}

/// Uncoloured report: header, then created, updated and deleted table blocks,
/// each block followed by a blank line.
pub fn render_report(diff: &SchemaDiff) -> String {
    let mut out = format!("Base: {}\n\n", diff.base_id);

    for table in &diff.tables.created {
        push_block(&mut out, table_block(TableChangeKind::Create, table, None));
    }
    for table_diff in &diff.tables.updated {
        push_block(
            &mut out,
            table_block(table_diff.kind, &table_diff.table, table_diff.fields.as_ref()),
        );
    }
    for table in &diff.tables.deleted {
        push_block(&mut out, table_block(TableChangeKind::Delete, table, None));
    }

    out
}

fn push_block(out: &mut String, lines: Vec<String>) {
    out.push_str(&lines.join("\n"));
    out.push_str("\n\n");
}

fn table_block(kind: TableChangeKind, table: &Table, fields: Option<&FieldSetDiff>) -> Vec<String> {
    let mut lines = vec![format!("{} {} ({})", kind.sigil(), table.name, kind.label())];

    match (kind, fields) {
        (TableChangeKind::Update, Some(fields)) => {
            for field in &fields.created {
                created_field_lines(&mut lines, field);
            }
            for update in &fields.updated {
                updated_field_lines(&mut lines, update);
            }
            for field in &fields.deleted {
                lines.push(field_line('-', field));
            }
        }
        (TableChangeKind::Create, _) => {
            for field in &table.fields {
                created_field_lines(&mut lines, field);
            }
        }
        (TableChangeKind::Delete, _) => {
            for field in &table.fields {
                lines.push(field_line('-', field));
            }
        }
        (TableChangeKind::Update, None) => {}
    }

    lines
}

fn field_line(sigil: char, field: &Field) -> String {
    format!("  {sigil} {} ({})", field.name, field.field_type)
}

fn created_field_lines(lines: &mut Vec<String>, field: &Field) {
    lines.push(field_line('+', field));
    let options = field.options_or_empty();
    if !options.is_empty() {
        lines.push("    options:".to_string());
        for (key, value) in options {
            lines.push(format!("      + {key}: {value}"));
        }
    }
}

fn updated_field_lines(lines: &mut Vec<String>, update: &FieldUpdate) {
    lines.push(field_line('~', &update.new));
    for change in &update.changes {
        lines.push(format!("    {change}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::diff::SchemaDiffEngine;
    use crate::domain::schema::Base;
    use serde_json::json;

    fn customers() -> Table {
        Table::new(
            "tbl1",
            "Customers",
            vec![
                Field::new("f1", "Email", "email"),
                Field::new("f2", "Retries", "number").with_option("retry", json!(3)),
            ],
        )
    }

    fn diff(old: &Base, new: &Base) -> SchemaDiff {
        SchemaDiffEngine::new().compare(old, new).unwrap()
    }

    #[test]
    fn empty_diff_is_header_only() {
        let base = Base::new("app1", vec![customers()]);
        assert_eq!(render_report(&diff(&base, &base)), "Base: app1\n\n");
    }

    #[test]
    fn new_table_lists_fields_and_options() {
        let old = Base::new("app1", vec![]);
        let orders = Table::new(
            "tblX",
            "Orders",
            vec![
                Field::new("fld1", "Total", "number"),
                Field::new("fld2", "Price", "currency")
                    .with_option("symbol", json!("$"))
                    .with_option("precision", json!(2)),
            ],
        );
        let new = Base::new("app1", vec![orders]);

        assert_eq!(
            render_report(&diff(&old, &new)),
            "Base: app1\n\n\
             + Orders (NEW TABLE)\n\
             \x20 + Total (number)\n\
             \x20 + Price (currency)\n\
             \x20   options:\n\
             \x20     + symbol: \"$\"\n\
             \x20     + precision: 2\n\n"
        );
    }

    #[test]
    fn removed_table_lists_fields_without_options() {
        let old = Base::new("app1", vec![customers()]);
        let new = Base::new("app1", vec![]);

        assert_eq!(
            render_report(&diff(&old, &new)),
            "Base: app1\n\n\
             - Customers (REMOVED TABLE)\n\
             \x20 - Email (email)\n\
             \x20 - Retries (number)\n\n"
        );
    }

    #[test]
    fn modified_table_lists_created_updated_deleted_fields() {
        let old = Base::new("app1", vec![customers()]);
        let mut changed = customers();
        changed.fields[1] = Field::new("f2", "Retries", "number").with_option("retry", json!(5));
        changed.fields.remove(0);
        changed
            .fields
            .push(Field::new("f3", "Phone", "phoneNumber").with_option("format", json!("intl")));
        let new = Base::new("app1", vec![changed]);

        assert_eq!(
            render_report(&diff(&old, &new)),
            "Base: app1\n\n\
             ~ Customers (MODIFIED TABLE)\n\
             \x20 + Phone (phoneNumber)\n\
             \x20   options:\n\
             \x20     + format: \"intl\"\n\
             \x20 ~ Retries (number)\n\
             \x20   options: ~ retry: 3 → 5\n\
             \x20 - Email (email)\n\n"
        );
    }

    #[test]
    fn blocks_are_ordered_created_updated_deleted() {
        let gone = Table::new("tblA", "Archive", vec![]);
        let old = Base::new("app1", vec![gone, customers()]);
        let mut renamed = customers();
        renamed.name = "Clients".into();
        let new = Base::new("app1", vec![renamed, Table::new("tblB", "Backlog", vec![])]);

        let report = render_report(&diff(&old, &new));
        let headers: Vec<&str> = report
            .lines()
            .filter(|l| l.ends_with("TABLE)"))
            .collect();
        assert_eq!(
            headers,
            vec![
                "+ Backlog (NEW TABLE)",
                "~ Clients (MODIFIED TABLE)",
                "- Archive (REMOVED TABLE)",
            ]
        );
    }

    #[test]
    fn nested_option_objects_keep_document_order() {
        let status: Field = serde_json::from_str(
            r#"{"id":"f9","name":"Status","type":"singleSelect",
                "options":{"choices":[{"id":"sel1","name":"Todo","color":"blue"}]}}"#,
        )
        .unwrap();
        let old = Base::new("app1", vec![]);
        let new = Base::new("app1", vec![Table::new("tbl9", "Tasks", vec![status])]);

        let out = TextWriter::plain().format(&diff(&old, &new)).unwrap();
        assert!(out.contains(r#"      + choices: [{"id":"sel1","name":"Todo","color":"blue"}]"#));
    }

    #[test]
    fn colored_writer_adds_escapes_plain_does_not() {
        let old = Base::new("app1", vec![]);
        let new = Base::new("app1", vec![customers()]);
        let d = diff(&old, &new);

        let plain = TextWriter::plain().format(&d).unwrap();
        assert!(!plain.contains('\x1b'));

        let colored = TextWriter::colored(Palette::default()).format(&d).unwrap();
        assert!(colored.contains("\x1b[32m+ Customers (NEW TABLE)\x1b[0m"));
        let field_lines: Vec<_> = plain.lines().filter(|l| l.starts_with("  + ")).collect();
        assert!(!field_lines.is_empty());
        for line in field_lines {
            assert!(colored.lines().any(|l| l == line), "{line} should stay plain");
        }
    }
}
