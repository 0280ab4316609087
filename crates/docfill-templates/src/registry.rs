use docfill_core::config::{TemplateEntry, TemplatesConfig};
use docfill_core::tags::Tag;
use docfill_core::{DocfillError, Result};
use serde::Serialize;

/// A selectable template and, once loaded, its bytes and fields
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub name: String,
    pub file_name: String,
    /// Path handed to the template source
    pub path: String,
    #[serde(skip)]
    pub content: Option<Vec<u8>>,
    pub fields: Vec<Tag>,
}

impl Template {
    pub fn new(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            name: name.into(),
            path: file_name.clone(),
            file_name,
            content: None,
            fields: Vec::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.content.is_some()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Drop loaded content and fields
    pub fn clear(&mut self) {
        self.content = None;
        self.fields.clear();
    }

    /// Extension of the template file, `docx` when it has none
    pub fn extension(&self) -> &str {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("docx")
    }
}

impl From<&TemplateEntry> for Template {
    fn from(entry: &TemplateEntry) -> Self {
        Template::new(&entry.name, &entry.file_name)
    }
}

/// Fixed, ordered list of templates
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn from_config(config: &TemplatesConfig) -> Self {
        Self::new(config.entries.iter().map(Template::from).collect())
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Template> {
        self.templates.get_mut(index)
    }

    /// Resolve a user query to a template index
    ///
    /// Matches a 1-based position, or a display name, file name or file stem
    /// ignoring case.
    pub fn find(&self, query: &str) -> Result<usize> {
        let query = query.trim();

        if let Ok(position) = query.parse::<usize>()
            && (1..=self.templates.len()).contains(&position)
        {
            return Ok(position - 1);
        }

        let wanted = query.to_lowercase();
        self.templates
            .iter()
            .position(|t| {
                let file_name = t.file_name.to_lowercase();
                let stem = file_name.rsplit_once('.').map_or(file_name.as_str(), |(stem, _)| stem);
                t.name.to_lowercase() == wanted || file_name == wanted || stem == wanted
            })
            .ok_or_else(|| DocfillError::TemplateNotFound(query.to_string()))
    }
}
