//! Core library for docfill
//!
//! Placeholder extraction, field formatting, form state and `.docx` rendering.
//! Template retrieval lives in `docfill-templates`; the command line in `docfill`.

pub mod config;
pub mod docx;
pub mod error;
pub mod form;
pub mod format;
pub mod tags;

pub use error::{DocfillError, Result};
