use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option map of a field, kept in document order for display.
///
/// Equality never depends on that order (see `application::equality`).
pub type FieldOptions = IndexMap<String, Value>;

/// Anything matched across two snapshots by a stable identifier.
pub trait Entity {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<FieldOptions>,
}

impl Field {
    pub fn new(id: &str, name: &str, field_type: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            field_type: field_type.to_string(),
            description: None,
            options: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Appends an option, keeping insertion order.
    pub fn with_option(mut self, key: &str, value: Value) -> Self {
        self.options
            .get_or_insert_with(FieldOptions::new)
            .insert(key.to_string(), value);
        self
    }

    /// Options of the field; an absent map reads as an empty one.
    pub fn options_or_empty(&self) -> &FieldOptions {
        static EMPTY: std::sync::OnceLock<FieldOptions> = std::sync::OnceLock::new();
        match &self.options {
            Some(options) => options,
            None => EMPTY.get_or_init(FieldOptions::new),
        }
    }
}

impl Entity for Field {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A table of a base.
///
/// Input documents may carry a `views` array; it is presentation-only and is
/// discarded on deserialization, so it can never show up in a diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub name: String,
    pub fields: Vec<Field>,
}

impl Table {
    pub fn new(id: &str, name: &str, fields: Vec<Field>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            fields,
        }
    }
}

impl Entity for Table {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A full schema snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub id: String,
    pub tables: Vec<Table>,
}

impl Base {
    pub fn new(id: &str, tables: Vec<Table>) -> Self {
        Self {
            id: id.to_string(),
            tables,
        }
    }

    pub fn find_table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn views_are_dropped_on_deserialize() {
        let raw = json!({
            "id": "tbl1",
            "name": "Orders",
            "fields": [],
            "views": [{"id": "viw1", "name": "Grid", "type": "grid"}]
        });
        let table: Table = serde_json::from_value(raw).unwrap();
        let back = serde_json::to_value(&table).unwrap();
        assert!(back.get("views").is_none());
    }

    #[test]
    fn field_type_is_renamed_and_optionals_skipped() {
        let field = Field::new("fld1", "Total", "number");
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value, json!({"id": "fld1", "name": "Total", "type": "number"}));
    }

    #[test]
    fn options_keep_document_order() {
        let raw = r#"{"id":"f","name":"n","type":"t","options":{"zeta":1,"alpha":2}}"#;
        let field: Field = serde_json::from_str(raw).unwrap();
        let keys: Vec<_> = field.options_or_empty().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn find_table_by_id() {
        let base = Base::new("app1", vec![Table::new("tbl1", "A", vec![])]);
        assert_eq!(base.find_table("tbl1").map(|t| t.name.as_str()), Some("A"));
        assert!(base.find_table("tbl2").is_none());
    }
}
