#[cfg(feature = "cli")]
pub mod cli_summary;
pub mod colorize;
pub mod writers;
