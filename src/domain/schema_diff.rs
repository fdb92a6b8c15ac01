use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::domain::schema::{Field, Table};

/// Marker printed between the old and the new value of a changed attribute.
pub const ARROW: &str = "→";

/// Created / updated / deleted fields of one table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldSetDiff {
    pub created: Vec<Field>,
    pub updated: Vec<FieldUpdate>,
    pub deleted: Vec<Field>,
}

impl FieldSetDiff {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// A field present on both sides whose value changed.
#[derive(Debug, Clone, Serialize)]
pub struct FieldUpdate {
    pub old: Field,
    pub new: Field,
    /// Attribute-level changes, in display order. Not part of the JSON shape.
    #[serde(skip)]
    pub changes: Vec<FieldChange>,
}

/// One attribute-level change of an updated field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Name { old: String, new: String },
    Type { old: String, new: String },
    Description { old: Option<String>, new: Option<String> },
    OptionAdded { key: String, value: Value },
    OptionRemoved { key: String, value: Value },
    OptionModified { key: String, old: Value, new: Value },
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldChange::Name { old, new } => write!(f, "name: {old} {ARROW} {new}"),
            FieldChange::Type { old, new } => write!(f, "type: {old} {ARROW} {new}"),
            FieldChange::Description { old, new } => write!(
                f,
                "description: \"{}\" {ARROW} \"{}\"",
                old.as_deref().unwrap_or_default(),
                new.as_deref().unwrap_or_default()
            ),
            FieldChange::OptionAdded { key, value } => write!(f, "options: + {key}: {value}"),
            FieldChange::OptionRemoved { key, value } => write!(f, "options: - {key}: {value}"),
            FieldChange::OptionModified { key, old, new } => {
                write!(f, "options: ~ {key}: {old} {ARROW} {new}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TableChangeKind {
    Create,
    Update,
    Delete,
}

impl TableChangeKind {
    pub fn sigil(self) -> char {
        match self {
            TableChangeKind::Create => '+',
            TableChangeKind::Update => '~',
            TableChangeKind::Delete => '-',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TableChangeKind::Create => "NEW TABLE",
            TableChangeKind::Update => "MODIFIED TABLE",
            TableChangeKind::Delete => "REMOVED TABLE",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableDiff {
    #[serde(rename = "type")]
    pub kind: TableChangeKind,
    pub table: Table,
    /// Only present for [`TableChangeKind::Update`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldSetDiff>,
}

impl TableDiff {
    pub fn created(table: Table) -> Self {
        Self {
            kind: TableChangeKind::Create,
            table,
            fields: None,
        }
    }

    pub fn updated(table: Table, fields: FieldSetDiff) -> Self {
        Self {
            kind: TableChangeKind::Update,
            table,
            fields: Some(fields),
        }
    }

    pub fn deleted(table: Table) -> Self {
        Self {
            kind: TableChangeKind::Delete,
            table,
            fields: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TableChanges {
    pub created: Vec<Table>,
    pub updated: Vec<TableDiff>,
    pub deleted: Vec<Table>,
}

/// Everything that changed between two snapshots of a base.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDiff {
    #[serde(rename = "baseId")]
    pub base_id: String,
    pub tables: TableChanges,
}

/// Change counts of a [`SchemaDiff`].
///
/// Field counts cover updated tables only: a created or deleted table is
/// counted once, as a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub tables_created: usize,
    pub tables_updated: usize,
    pub tables_deleted: usize,
    pub fields_created: usize,
    pub fields_updated: usize,
    pub fields_deleted: usize,
}

impl DiffSummary {
    pub fn total_changes(&self) -> usize {
        self.tables_created
            + self.tables_updated
            + self.tables_deleted
            + self.fields_created
            + self.fields_updated
            + self.fields_deleted
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

impl SchemaDiff {
    pub fn is_empty(&self) -> bool {
        self.tables.created.is_empty()
            && self.tables.updated.is_empty()
            && self.tables.deleted.is_empty()
    }

    pub fn summary(&self) -> DiffSummary {
        let field_sets = || self.tables.updated.iter().filter_map(|t| t.fields.as_ref());
        DiffSummary {
            tables_created: self.tables.created.len(),
            tables_updated: self.tables.updated.len(),
            tables_deleted: self.tables.deleted.len(),
            fields_created: field_sets().map(|f| f.created.len()).sum(),
            fields_updated: field_sets().map(|f| f.updated.len()).sum(),
            fields_deleted: field_sets().map(|f| f.deleted.len()).sum(),
        }
    }
}
