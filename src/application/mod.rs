pub mod diff;
pub mod equality;
pub mod matcher;
