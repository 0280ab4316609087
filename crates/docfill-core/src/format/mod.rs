//! Field formatters
//!
//! Turn raw form input into the final strings written into a document.
//! None of these fail: input a formatter cannot interpret comes back
//! unchanged.

pub mod date;
pub mod number;
pub mod words;

pub use date::{format_date, DateFormat, DEFAULT_DATE_FORMAT};
pub use number::{format_number, DECIMAL_OPTIONS, MAX_DECIMAL_PLACES};
pub use words::{is_long_text_field, limit_words, LONG_TEXT_KEYS, WORD_LIMIT};
