//! Defaults shared by the config model and its consumers

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "docfill.toml";

/// Template source used when none is configured
pub const DEFAULT_TEMPLATE_SOURCE: &str = "templates";

/// Generated report file names start with this prefix
pub const DEFAULT_REPORT_PREFIX: &str = "Engagement_Report";

/// Built-in registry: (display name, file name)
pub const DEFAULT_TEMPLATES: [(&str, &str); 3] = [
    ("NBFC less than 500 crores", "template1.docx"),
    ("NBFC 500 to 1000 crores", "template2.docx"),
    ("NBFC more than 1000 crores", "template3.docx"),
];
