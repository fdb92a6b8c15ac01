use crate::domain::{ports::OutputWriter, schema_diff::SchemaDiff};
use crate::error::Result;

/// Pretty-printed `SchemaDiff`, 2-space indented.
///
/// The shape is exactly the diff record: `baseId`, then `tables` with
/// `created`, `updated` (`type` / `table` / `fields`) and `deleted`.
/// Never colourized.
pub struct JsonWriter;

impl OutputWriter for JsonWriter {
    fn format(&self, diff: &SchemaDiff) -> Result<String> {
        Ok(serde_json::to_string_pretty(diff)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::diff::SchemaDiffEngine;
    use crate::domain::schema::{Base, Field, Table};
    use serde_json::{json, Value};

    fn make_diff() -> SchemaDiff {
        let old = Base::new(
            "app1",
            vec![
                Table::new(
                    "tbl1",
                    "Customers",
                    vec![
                        Field::new("f1", "Email", "email"),
                        Field::new("f2", "Retries", "number").with_option("retry", json!(3)),
                    ],
                ),
                Table::new("tbl9", "Legacy", vec![Field::new("f9", "Old", "text")]),
            ],
        );
        let new = Base::new(
            "app1",
            vec![
                Table::new(
                    "tbl1",
                    "Customers",
                    vec![Field::new("f2", "Retries", "number").with_option("retry", json!(5))],
                ),
                Table::new("tblX", "Orders", vec![Field::new("fld1", "Total", "number")]),
            ],
        );
        SchemaDiffEngine::new().compare(&old, &new).unwrap()
    }

    #[test]
    fn json_output_has_diff_record_shape() {
        let output = JsonWriter.format(&make_diff()).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["baseId"], "app1");
        assert_eq!(
            parsed["tables"]["created"],
            json!([{"id": "tblX", "name": "Orders", "fields": [{"id": "fld1", "name": "Total", "type": "number"}]}])
        );
        assert_eq!(parsed["tables"]["deleted"][0]["id"], "tbl9");

        let updated = &parsed["tables"]["updated"][0];
        assert_eq!(updated["type"], "UPDATE");
        assert_eq!(updated["table"]["id"], "tbl1");
        assert_eq!(updated["fields"]["created"], json!([]));
        assert_eq!(updated["fields"]["deleted"][0]["id"], "f1");
        assert_eq!(updated["fields"]["updated"][0]["old"]["options"]["retry"], 3);
        assert_eq!(updated["fields"]["updated"][0]["new"]["options"]["retry"], 5);
        assert!(updated["fields"]["updated"][0].get("changes").is_none());
    }

    #[test]
    fn json_output_keys_follow_record_order() {
        let output = JsonWriter.format(&make_diff()).unwrap();
        let base_id = output.find("\"baseId\"").unwrap();
        let created = output.find("\"created\"").unwrap();
        let updated = output.find("\"updated\"").unwrap();
        let deleted = output.rfind("\"deleted\"").unwrap();
        assert!(base_id < created && created < updated && updated < deleted);
        assert!(output.starts_with("{\n  \"baseId\""));
    }
}
