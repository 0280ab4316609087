use regex::{Captures, Regex};

use crate::error::{DocfillError, Result};
use crate::form::ReplacementMap;

/// Compiled placeholder matcher for one replacement map
///
/// All names are matched in a single pass, widest braces first, so text
/// inserted for one placeholder is never scanned again.
pub struct Substituter<'a> {
    replacements: &'a ReplacementMap,
    pattern: Option<Regex>,
}

impl<'a> Substituter<'a> {
    pub fn new(replacements: &'a ReplacementMap) -> Result<Self> {
        if replacements.is_empty() {
            return Ok(Self {
                replacements,
                pattern: None,
            });
        }

        // Longest names first so a name is never shadowed by its own prefix
        let mut names: Vec<&str> = replacements.iter().map(|(name, _)| name).collect();
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));
        let names = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        let source = format!(
            r"\{{\{{\{{\s*({names})\s*(?:/[^}}]+)?\}}\}}\}}|\{{\{{\s*({names})\s*(?:/[^}}]+)?\}}\}}|\{{\s*({names})\s*(?:/[^}}]+)?\}}"
        );
        let pattern = Regex::new(&source)
            .map_err(|e| DocfillError::Generic(format!("cannot build tag pattern: {}", e)))?;

        Ok(Self {
            replacements,
            pattern: Some(pattern),
        })
    }

    pub fn apply(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures| {
                let name = (1..=3)
                    .find_map(|i| caps.get(i))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                match self.replacements.get(name) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Replace every placeholder for the mapped names in `text`
pub fn substitute(text: &str, replacements: &ReplacementMap) -> Result<String> {
    Ok(Substituter::new(replacements)?.apply(text))
}
