//! Selected-template lifecycle: load, fill, generate

use chrono::{DateTime, Utc};
use docfill_core::config::FormConfig;
use docfill_core::config::consts::DEFAULT_REPORT_PREFIX;
use docfill_core::docx::{body_text, read_body, render};
use docfill_core::form::{FormValues, ReplacementMap};
use docfill_core::tags::extract_tags;
use docfill_core::{DocfillError, Result};
use tracing::{debug, info, warn};

use crate::registry::{Template, TemplateRegistry};
use crate::source::TemplateSource;

/// A filled document ready to be saved
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub replacements: ReplacementMap,
}

/// Holds at most one selected template and its form
///
/// Generation takes `&mut self`, so a second generation cannot start while
/// one is running.
pub struct TemplateSession {
    registry: TemplateRegistry,
    source: Box<dyn TemplateSource>,
    form_config: FormConfig,
    report_prefix: String,
    selected: Option<usize>,
    values: Option<FormValues>,
}

impl TemplateSession {
    pub fn new(
        registry: TemplateRegistry,
        source: Box<dyn TemplateSource>,
        form_config: FormConfig,
    ) -> Self {
        Self {
            registry,
            source,
            form_config,
            report_prefix: DEFAULT_REPORT_PREFIX.to_string(),
            selected: None,
            values: None,
        }
    }

    /// Use `prefix` for generated file names
    pub fn with_report_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.report_prefix = prefix.into();
        self
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn source(&self) -> &dyn TemplateSource {
        self.source.as_ref()
    }

    /// Fetch a template, extract its fields and start an empty form
    ///
    /// Any previous selection is discarded first, even if this one fails.
    pub fn select(&mut self, index: usize) -> Result<&Template> {
        self.deselect();

        let template = self
            .registry
            .get(index)
            .ok_or_else(|| DocfillError::TemplateNotFound(format!("#{}", index + 1)))?;
        debug!(template = %template.name, source = %self.source.describe(), "loading template");

        let bytes = self.source.fetch(&template.path)?;
        let text = body_text(&read_body(&bytes)?);
        if text.is_empty() {
            warn!(template = %template.name, "template body has no text");
        }

        let fields = extract_tags(&text);
        if fields.is_empty() {
            warn!(template = %template.name, "no fields found in template");
        }

        let values = FormValues::for_fields(&fields, &self.form_config);
        let template = self
            .registry
            .get_mut(index)
            .ok_or_else(|| DocfillError::TemplateNotFound(format!("#{}", index + 1)))?;
        template.content = Some(bytes);
        template.fields = fields;

        self.selected = Some(index);
        self.values = Some(values);
        Ok(template)
    }

    /// Forget the selected template and its form
    pub fn deselect(&mut self) {
        if let Some(index) = self.selected.take()
            && let Some(template) = self.registry.get_mut(index)
        {
            template.clear();
        }
        self.values = None;
    }

    pub fn selected(&self) -> Option<&Template> {
        self.selected.and_then(|index| self.registry.get(index))
    }

    pub fn values(&self) -> Option<&FormValues> {
        self.values.as_ref()
    }

    pub fn values_mut(&mut self) -> Result<&mut FormValues> {
        self.values.as_mut().ok_or(DocfillError::NoTemplateSelected)
    }

    /// Validate the form and render the selected template
    pub fn generate(&mut self, now: DateTime<Utc>) -> Result<GeneratedReport> {
        let template = self.selected().ok_or(DocfillError::NoTemplateSelected)?;
        let values = self.values.as_ref().ok_or(DocfillError::NoTemplateSelected)?;
        let content = template
            .content
            .as_deref()
            .ok_or(DocfillError::NoTemplateSelected)?;

        values.validate()?;

        let replacements = values.replacements();
        let bytes = render(content, &replacements)?;
        let file_name =
            report_file_name(&self.report_prefix, &template.name, now, template.extension());

        info!(file = %file_name, fields = replacements.len(), "generated report");
        Ok(GeneratedReport {
            file_name,
            bytes,
            replacements,
        })
    }
}

/// `<prefix>_<name>_<timestamp>.<ext>`, whitespace runs in the name as `_`
pub fn report_file_name(prefix: &str, template_name: &str, now: DateTime<Utc>, ext: &str) -> String {
    let mut name = String::with_capacity(template_name.len());
    let mut in_space = false;
    for c in template_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }

    format!(
        "{}_{}_{}.{}",
        prefix,
        name,
        now.format("%Y-%m-%dT%H-%M-%S"),
        ext
    )
}
