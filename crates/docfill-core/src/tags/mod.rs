//! Tags module - placeholder discovery in document text
//!
//! Templates carry their form definition inline: every placeholder in the body
//! text becomes one form field.
//!
//! ## Syntax
//!
//! | Depth | Kind | Plain | With options |
//! |---|---|---|---|
//! | 1 | text | `{N}` | `{N/'o1','o2'}` |
//! | 2 | number | `{{N}}` | `{{N/'o1','o2'}}` |
//! | 3 | date | `{{{N}}}` | `{{{N/'o1','o2'}}}` |
//!
//! Brace depth alone decides the kind. A `/` inside the braces turns the field
//! into a dropdown whose options follow the slash, comma separated.
//!
//! ## Precedence
//!
//! Deeper spans are scanned first and cut out of the working text, so
//! `{{{due}}}` never also shows up as `{{due}}` or `{due}`. A name keeps the
//! kind it was first discovered with; later discoveries are dropped.

pub mod extract;
pub mod model;

pub use extract::{clean_option, extract_tags};
pub use model::{BaseKind, Tag, TagKind};
