pub mod fingerprint;
pub mod ports;
pub mod schema;
pub mod schema_diff;
pub mod value_objects;
