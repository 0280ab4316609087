//! CLI command implementations

pub mod fields;
pub mod formats;
pub mod generate;
pub mod list;
