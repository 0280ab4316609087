//! Template registry, retrieval and the fill-and-generate session

pub mod registry;
pub mod session;
pub mod source;

pub use registry::{Template, TemplateRegistry};
pub use session::{GeneratedReport, TemplateSession, report_file_name};
pub use source::{DirSource, HttpSource, TemplateSource, source_from_config};
