//! Canonical structural equality for schema entities.
//!
//! Attribute and option key order never affect the outcome. Comparing
//! serialized strings would, and would report changes that are not there.

use serde_json::{Number, Value};

use crate::domain::schema::{Field, FieldOptions, Table};

/// Field equality: every attribute, options compared as an unordered map.
pub fn fields_equal(a: &Field, b: &Field) -> bool {
    a.id == b.id
        && a.name == b.name
        && a.field_type == b.field_type
        && descriptions_equal(a, b)
        && match (&a.options, &b.options) {
            (None, None) => true,
            (Some(x), Some(y)) => options_equal(x, y),
            _ => false,
        }
}

/// An absent description reads as the empty string.
pub fn descriptions_equal(a: &Field, b: &Field) -> bool {
    a.description.as_deref().unwrap_or_default() == b.description.as_deref().unwrap_or_default()
}

/// Table equality: id, name, and the field sequence position by position.
pub fn tables_equal(a: &Table, b: &Table) -> bool {
    a.id == b.id
        && a.name == b.name
        && a.fields.len() == b.fields.len()
        && a.fields.iter().zip(&b.fields).all(|(x, y)| fields_equal(x, y))
}

pub fn options_equal(a: &FieldOptions, b: &FieldOptions) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(k, va)| b.get(k).map_or(false, |vb| json_equal(va, vb)))
}

/// Recursive JSON equality: objects by key set and per-key value, arrays
/// position by position, numbers by numeric value.
pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(na), Value::Number(nb)) => numbers_equal(na, nb),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(ma), Value::Object(mb)) => {
            ma.len() == mb.len()
                && ma
                    .iter()
                    .all(|(k, va)| mb.get(k).map_or(false, |vb| json_equal(va, vb)))
        }
        _ => a == b,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    // serde_json keeps integers canonical (PosInt / NegInt), so only a float
    // on either side needs a numeric comparison.
    if a.is_f64() || b.is_f64() {
        matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
    } else {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── fields_equal ──

    #[test]
    fn test_absent_and_empty_description_are_equal() {
        let bare = Field::new("f1", "Email", "email");
        let empty = bare.clone().with_description("");
        assert!(fields_equal(&bare, &empty));
        assert!(!fields_equal(&bare, &bare.clone().with_description("Contact")));
    }

    // ── json_equal ──

    #[test]
    fn test_json_equal_ignores_object_key_order() {
        let a = json!({"a": 1, "b": 2});
        let b = json!({"b": 2, "a": 1});
        assert!(json_equal(&a, &b));
    }

    #[test]
    fn test_json_equal_nested() {
        let a = json!({"a": 1, "b": [1, 2, 3], "c": {"x": 10, "y": null}});
        let b = json!({"c": {"y": null, "x": 10}, "b": [1, 2, 3], "a": 1});
        assert!(json_equal(&a, &b));
    }

    #[test]
    fn test_json_equal_array_order_matters() {
        assert!(!json_equal(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn test_json_equal_integer_and_float() {
        assert!(json_equal(&json!(3), &json!(3.0)));
        assert!(!json_equal(&json!(3), &json!(3.5)));
        assert!(!json_equal(&json!(3), &json!("3")));
    }

    #[test]
    fn test_json_equal_missing_key() {
        assert!(!json_equal(&json!({"a": 1}), &json!({"a": 1, "b": null})));
    }

    // ── fields_equal ──

    #[test]
    fn fields_equal_ignores_option_order() {
        let a = Field::new("f1", "Status", "singleSelect")
            .with_option("choices", json!([{"id": "sel1", "name": "Todo", "color": "blue"}]))
            .with_option("retry", json!(3));
        let b = Field::new("f1", "Status", "singleSelect")
            .with_option("retry", json!(3))
            .with_option("choices", json!([{"color": "blue", "name": "Todo", "id": "sel1"}]));
        assert!(fields_equal(&a, &b));
    }

    #[test]
    fn fields_differ_on_any_attribute() {
        let base = Field::new("f1", "Email", "email");
        assert!(!fields_equal(&base, &Field::new("f1", "Mail", "email")));
        assert!(!fields_equal(&base, &Field::new("f1", "Email", "text")));
        assert!(!fields_equal(&base, &base.clone().with_description("x")));
        assert!(!fields_equal(&base, &base.clone().with_option("k", json!(1))));
    }

    #[test]
    fn absent_and_empty_options_differ() {
        let bare = Field::new("f1", "Email", "email");
        let mut empty = bare.clone();
        empty.options = Some(FieldOptions::new());
        assert!(!fields_equal(&bare, &empty));
    }

    // ── tables_equal ──

    #[test]
    fn tables_compare_fields_positionally() {
        let a = Table::new(
            "t",
            "T",
            vec![Field::new("f1", "A", "text"), Field::new("f2", "B", "text")],
        );
        let mut b = a.clone();
        assert!(tables_equal(&a, &b));
        b.fields.reverse();
        assert!(!tables_equal(&a, &b));
    }
}
