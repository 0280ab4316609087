//! Per-template form state and the replacement map derived from it

pub mod replacements;
pub mod values;

pub use replacements::ReplacementMap;
pub use values::{FieldState, FormValues};
