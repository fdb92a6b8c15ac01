use tracing::{debug, instrument};

use crate::application::equality::{descriptions_equal, fields_equal, json_equal, tables_equal};
use crate::application::matcher::match_entities;
use crate::domain::schema::{Base, Field, Table};
use crate::domain::schema_diff::{
    FieldChange, FieldSetDiff, FieldUpdate, SchemaDiff, TableChanges, TableDiff,
};
use crate::error::{DiffError, Result};

// ─── Schema Diff Engine ───

/// Top-level comparison of two base snapshots.
///
/// Pure: both inputs are borrowed, nothing is mutated, and calls share no
/// state, so one engine can serve concurrent comparisons.
#[derive(Default)]
pub struct SchemaDiffEngine {
    tables: TableDiffer,
    fields: FieldDiffer,
}

impl SchemaDiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `old` against `new`.
    ///
    /// Both bases must already satisfy the structural contract; nothing is
    /// re-validated here. The only error is [`DiffError::TableNotFound`], which
    /// signals a matching bug rather than bad input.
    #[instrument(
        name = "compare",
        skip(self, old, new),
        fields(base.id = %new.id, old.tables = old.tables.len(), new.tables = new.tables.len()),
        level = "debug"
    )]
    pub fn compare(&self, old: &Base, new: &Base) -> Result<SchemaDiff> {
        let table_set = self.tables.diff_tables(&old.tables, &new.tables);

        let mut updated = Vec::with_capacity(table_set.updated.len());
        for table in table_set.updated {
            let previous = old
                .find_table(&table.id)
                .ok_or_else(|| DiffError::TableNotFound {
                    id: table.id.clone(),
                })?;
            let fields = self.fields.diff_fields(&previous.fields, &table.fields);
            debug!(
                table = %table.name,
                created = fields.created.len(),
                updated = fields.updated.len(),
                deleted = fields.deleted.len(),
                "table modified"
            );
            updated.push(TableDiff::updated(table.clone(), fields));
        }

        let diff = SchemaDiff {
            base_id: new.id.clone(),
            tables: TableChanges {
                created: table_set.created.into_iter().cloned().collect(),
                updated,
                deleted: table_set.deleted.into_iter().cloned().collect(),
            },
        };
        debug!(changes = diff.summary().total_changes(), "compare completed");
        Ok(diff)
    }
}

// ─── Table Differ ───

/// Tables of a base split by change kind. `updated` holds new-side tables.
#[derive(Debug)]
pub struct TableSetDiff<'a> {
    pub created: Vec<&'a Table>,
    pub updated: Vec<&'a Table>,
    pub deleted: Vec<&'a Table>,
}

#[derive(Default)]
pub struct TableDiffer;

impl TableDiffer {
    pub fn new() -> Self {
        Self
    }

    pub fn diff_tables<'a>(&self, old: &'a [Table], new: &'a [Table]) -> TableSetDiff<'a> {
        let matched = match_entities(old, new, tables_equal);
        TableSetDiff {
            created: matched.created,
            updated: matched.changed.into_iter().map(|(_, t)| t).collect(),
            deleted: matched.deleted,
        }
    }
}

// ─── Field Differ ───

#[derive(Default)]
pub struct FieldDiffer;

impl FieldDiffer {
    pub fn new() -> Self {
        Self
    }

    pub fn diff_fields(&self, old: &[Field], new: &[Field]) -> FieldSetDiff {
        let matched = match_entities(old, new, fields_equal);
        FieldSetDiff {
            created: matched.created.into_iter().cloned().collect(),
            updated: matched
                .changed
                .into_iter()
                .map(|(before, after)| FieldUpdate {
                    old: before.clone(),
                    new: after.clone(),
                    changes: field_changes(before, after),
                })
                .collect(),
            deleted: matched.deleted.into_iter().cloned().collect(),
        }
    }
}

/// Attribute-level changes between two versions of a field.
///
/// Order: name, type, description, then options added (new map order),
/// removed (old map order) and modified (new map order).
pub fn field_changes(old: &Field, new: &Field) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if old.name != new.name {
        changes.push(FieldChange::Name {
            old: old.name.clone(),
            new: new.name.clone(),
        });
    }
    if old.field_type != new.field_type {
        changes.push(FieldChange::Type {
            old: old.field_type.clone(),
            new: new.field_type.clone(),
        });
    }
    if !descriptions_equal(old, new) {
        changes.push(FieldChange::Description {
            old: old.description.clone(),
            new: new.description.clone(),
        });
    }

    let before = old.options_or_empty();
    let after = new.options_or_empty();

    for (key, value) in after {
        if !before.contains_key(key) {
            changes.push(FieldChange::OptionAdded {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }
    for (key, value) in before {
        if !after.contains_key(key) {
            changes.push(FieldChange::OptionRemoved {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }
    for (key, value) in after {
        if let Some(previous) = before.get(key) {
            if !json_equal(previous, value) {
                changes.push(FieldChange::OptionModified {
                    key: key.clone(),
                    old: previous.clone(),
                    new: value.clone(),
                });
            }
        }
    }

    changes
}
