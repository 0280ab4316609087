//! Reading and filling `.docx` packages
//!
//! A package is a zip container; only [`BODY_ENTRY`] is ever inspected or
//! rewritten.

pub mod body;
pub mod package;
pub mod substitute;

pub use body::{body_text, rewrite_body};
pub use package::{read_body, render, BODY_ENTRY};
pub use substitute::{substitute, Substituter};
