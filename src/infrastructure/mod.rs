pub mod config;
pub mod source;
pub mod validation;
