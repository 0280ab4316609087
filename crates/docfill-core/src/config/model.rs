use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::consts::{
    CONFIG_FILE_NAME, DEFAULT_REPORT_PREFIX, DEFAULT_TEMPLATES, DEFAULT_TEMPLATE_SOURCE,
};
use crate::error::{DocfillError, Result};
use crate::format::{DateFormat, DEFAULT_DATE_FORMAT, LONG_TEXT_KEYS, MAX_DECIMAL_PLACES, WORD_LIMIT};

/// docfill.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory (relative to the config file) or http(s) base URL
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_entries")]
    pub entries: Vec<TemplateEntry>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            entries: default_entries(),
        }
    }
}

fn default_source() -> String {
    DEFAULT_TEMPLATE_SOURCE.to_string()
}

fn default_entries() -> Vec<TemplateEntry> {
    DEFAULT_TEMPLATES
        .iter()
        .map(|(name, file_name)| TemplateEntry {
            name: name.to_string(),
            file_name: file_name.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_word_limit")]
    pub word_limit: usize,
    #[serde(default = "default_long_text_keys")]
    pub long_text_keys: Vec<String>,
    #[serde(default = "default_date_format")]
    pub default_date_format: String,
    #[serde(default)]
    pub decimal_places: u8,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            word_limit: default_word_limit(),
            long_text_keys: default_long_text_keys(),
            default_date_format: default_date_format(),
            decimal_places: 0,
        }
    }
}

fn default_word_limit() -> usize {
    WORD_LIMIT
}

fn default_long_text_keys() -> Vec<String> {
    LONG_TEXT_KEYS.iter().map(|k| k.to_string()).collect()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            dir: default_output_dir(),
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_REPORT_PREFIX.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Parse and validate a docfill.toml document
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| DocfillError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read docfill.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DocfillError::ConfigParseError(e.to_string()))?;

        Self::parse(&content)
    }

    /// Write docfill.toml
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DocfillError::ConfigParseError(e.to_string()))?;

        std::fs::write(path.as_ref(), content)?;

        Ok(())
    }

    /// Load `dir/docfill.toml`, falling back to built-in defaults when absent
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values the form cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.form.decimal_places > MAX_DECIMAL_PLACES {
            return Err(DocfillError::ConfigInvalidValue {
                field: "form.decimal_places".to_string(),
                reason: format!("must be between 0 and {}", MAX_DECIMAL_PLACES),
            });
        }

        if self.form.word_limit == 0 {
            return Err(DocfillError::ConfigInvalidValue {
                field: "form.word_limit".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if DateFormat::lookup(&self.form.default_date_format).is_none() {
            return Err(DocfillError::ConfigInvalidValue {
                field: "form.default_date_format".to_string(),
                reason: format!("unknown date format '{}'", self.form.default_date_format),
            });
        }

        if self.templates.entries.is_empty() {
            return Err(DocfillError::ConfigInvalidValue {
                field: "templates.entries".to_string(),
                reason: "at least one template is required".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.templates.source, "templates");
        assert_eq!(config.templates.entries.len(), 3);
        assert_eq!(config.templates.entries[0].name, "NBFC less than 500 crores");
        assert_eq!(config.templates.entries[2].file_name, "template3.docx");
        assert_eq!(config.form.word_limit, 50);
        assert_eq!(config.form.decimal_places, 0);
        assert_eq!(config.form.default_date_format, "January 27, 2026 (Full)");
        assert_eq!(config.output.prefix, "Engagement_Report");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[templates]
source = "https://example.com/templates"

[[templates.entries]]
name = "Statutory audit"
file_name = "statutory.docx"

[form]
word_limit = 20
long_text_keys = ["remarks"]
default_date_format = "DD/MM/YYYY"
decimal_places = 2

[output]
prefix = "Audit_Report"
dir = "out"
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.templates.source, "https://example.com/templates");
        assert_eq!(
            config.templates.entries,
            vec![TemplateEntry {
                name: "Statutory audit".to_string(),
                file_name: "statutory.docx".to_string(),
            }]
        );
        assert_eq!(config.form.word_limit, 20);
        assert_eq!(config.form.long_text_keys, vec!["remarks"]);
        assert_eq!(config.form.decimal_places, 2);
        assert_eq!(config.output.prefix, "Audit_Report");
        assert_eq!(config.output.dir, PathBuf::from("out"));
    }

    #[test]
    fn test_decimal_places_above_five_rejected() {
        let err = Config::parse("[form]\ndecimal_places = 6\n").unwrap_err();
        assert!(err.to_string().starts_with("CONFIG_INVALID_VALUE: form.decimal_places"));
    }

    #[test]
    fn test_zero_word_limit_rejected() {
        let err = Config::parse("[form]\nword_limit = 0\n").unwrap_err();
        assert!(matches!(err, DocfillError::ConfigInvalidValue { .. }));
    }

    #[test]
    fn test_unknown_default_date_format_rejected() {
        let err = Config::parse("[form]\ndefault_date_format = \"YY\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown date format 'YY'"));
    }

    #[test]
    fn test_empty_entries_rejected() {
        let err = Config::parse("[templates]\nentries = []\n").unwrap_err();
        assert!(err.to_string().contains("templates.entries"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Config::parse("[form\n").unwrap_err();
        assert!(matches!(err, DocfillError::ConfigParseError(_)));
    }

    #[test]
    fn test_file_roundtrip_and_default_fallback() {
        let temp = docfill_testkit::temp_dir_in_workspace();
        assert_eq!(
            Config::load_or_default(temp.path()).unwrap().templates.entries.len(),
            3
        );

        let mut config = Config::default();
        config.form.decimal_places = 3;
        config.to_file(temp.path().join(CONFIG_FILE_NAME)).unwrap();

        let loaded = Config::load_or_default(temp.path()).unwrap();
        assert_eq!(loaded.form.decimal_places, 3);
    }
}
