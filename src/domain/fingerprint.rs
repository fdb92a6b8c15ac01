use sha2::{Digest, Sha256};

use crate::domain::schema::Base;
use crate::domain::value_objects::Fingerprint;

/// Compute a SHA-256 fingerprint of a base's schema content.
///
/// Algorithm:
/// 1. The base is converted to a `serde_json::Value` and rendered compactly
///    with every object's keys sorted, so option key order never leaks into
///    the hash.
/// 2. That string is hashed with SHA-256.
///
/// Table and field order *is* part of the fingerprint: two bases with the same
/// tables in a different order fingerprint differently even though they diff
/// as empty.
pub fn fingerprint(base: &Base) -> Fingerprint {
    let canonical = serde_json::to_value(base)
        .map(|v| canonical_string(&v))
        .unwrap_or_default();
    let hash = Sha256::digest(canonical.as_bytes());
    Fingerprint(format!("{:x}", hash))
}

fn canonical_string(value: &serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by_key(|(k, _)| *k);
            let body = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), canonical_string(v)))
                .collect::<Vec<_>>()
                .join(",");
            format!("{{{body}}}")
        }
        Value::Array(items) => {
            let body = items.iter().map(canonical_string).collect::<Vec<_>>().join(",");
            format!("[{body}]")
        }
        other => other.to_string(),
    }
}
