use serde::Serialize;
use tracing::debug;

use super::replacements::ReplacementMap;
use crate::config::FormConfig;
use crate::error::{DocfillError, Result};
use crate::format::{
    format_date, format_number, is_long_text_field, limit_words, DateFormat, MAX_DECIMAL_PLACES,
};
use crate::tags::{BaseKind, Tag};

/// State of one form field
#[derive(Debug, Clone, Serialize)]
pub struct FieldState {
    pub tag: Tag,
    pub value: String,
    /// Word count for long-text fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    /// Chosen date-format label for date fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

impl FieldState {
    pub fn name(&self) -> &str {
        &self.tag.name
    }

    pub fn is_long_text(&self) -> bool {
        self.word_count.is_some()
    }
}

/// Values entered for one template's fields, in extraction order
#[derive(Debug, Clone, Serialize)]
pub struct FormValues {
    fields: Vec<FieldState>,
    decimal_places: u8,
    #[serde(skip)]
    word_limit: usize,
}

impl FormValues {
    /// Initial form state for the given fields
    ///
    /// Dropdowns start at their first option, everything else empty. Date
    /// fields start with the configured default format.
    pub fn for_fields(tags: &[Tag], config: &FormConfig) -> Self {
        let fields = tags
            .iter()
            .map(|tag| {
                let value = if tag.kind.dropdown {
                    tag.options.first().cloned().unwrap_or_default()
                } else {
                    String::new()
                };
                let long_text = !tag.kind.dropdown
                    && tag.kind.base == BaseKind::Text
                    && is_long_text_field(&tag.name, &config.long_text_keys);
                let word_count = long_text.then(|| limit_words(&value, config.word_limit).1);
                let date_format = tag
                    .kind
                    .is_date()
                    .then(|| config.default_date_format.clone());

                FieldState {
                    tag: tag.clone(),
                    value,
                    word_count,
                    date_format,
                }
            })
            .collect();

        Self {
            fields,
            decimal_places: config.decimal_places.min(MAX_DECIMAL_PLACES),
            word_limit: config.word_limit,
        }
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.tag.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut FieldState> {
        self.fields
            .iter_mut()
            .find(|f| f.tag.name == name)
            .ok_or_else(|| DocfillError::UnknownField(name.to_string()))
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    pub fn decimal_places(&self) -> u8 {
        self.decimal_places
    }

    pub fn word_limit(&self) -> usize {
        self.word_limit
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Store a field value, capping long-text fields at the word limit
    ///
    /// Returns `true` when the stored value was truncated.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<bool> {
        let word_limit = self.word_limit;
        let field = self.field_mut(name)?;
        let value = value.into();

        if !field.is_long_text() {
            field.value = value;
            return Ok(false);
        }

        let (limited, count) = limit_words(&value, word_limit);
        let truncated = limited != value;
        if truncated {
            debug!(field = name, limit = word_limit, "truncated long-text value");
        }
        field.value = limited;
        field.word_count = Some(count);
        Ok(truncated)
    }

    /// Choose the rendering for one date field
    ///
    /// Accepts a display label or a bare pattern and stores the label.
    pub fn set_date_format(&mut self, name: &str, label: &str) -> Result<()> {
        let field = self.field_mut(name)?;
        if !field.tag.kind.is_date() {
            return Err(DocfillError::NotADateField(name.to_string()));
        }
        let format = DateFormat::lookup(label)
            .ok_or_else(|| DocfillError::InvalidDateFormat(label.to_string()))?;
        field.date_format = Some(format.label().to_string());
        Ok(())
    }

    /// Set the fractional digits used by every number field
    pub fn set_decimal_places(&mut self, places: u8) -> Result<()> {
        if places > MAX_DECIMAL_PLACES {
            return Err(DocfillError::InvalidDecimalPlaces(places));
        }
        self.decimal_places = places;
        Ok(())
    }

    /// Names of fields still empty, in field order
    pub fn missing_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.value.is_empty())
            .map(|f| f.tag.name.clone())
            .collect()
    }

    /// Fails with every empty field named
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DocfillError::ValidationFailed { fields: missing })
        }
    }

    /// Final substitution text for every field
    pub fn replacements(&self) -> ReplacementMap {
        self.fields
            .iter()
            .map(|field| {
                let rendered = match field.tag.kind.base {
                    BaseKind::Date => format_date(
                        &field.value,
                        field.date_format.as_deref().unwrap_or_default(),
                    ),
                    BaseKind::Number => format_number(&field.value, self.decimal_places),
                    BaseKind::Text => field.value.clone(),
                };
                (field.tag.name.clone(), rendered)
            })
            .collect()
    }
}
