//! Fields command - load a template and describe its form

use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use docfill_core::form::FieldState;
use serde_json::json;
use std::path::Path;

/// Show the fields of one template
///
/// # Arguments
///
/// * `config` - Explicit config file, if given
/// * `template` - Position, name or file name of the template
/// * `json` - Output as JSON if true
/// * `verbose` - Enable verbose output if true
pub fn run(config: Option<&Path>, template: &str, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let mut session = ctx.session()?;

    let index = session.registry().find(template)?;
    if !json {
        println!(
            "{} Loading '{}' from {}",
            "→".cyan(),
            session.registry().templates()[index].name,
            session.source().describe()
        );
    }
    session.select(index)?;

    let Some(selected) = session.selected() else {
        anyhow::bail!("template was not loaded");
    };
    let fields = session.values().map(|v| v.fields()).unwrap_or_default();
    let word_limit = session.values().map(|v| v.word_limit()).unwrap_or_default();

    if json {
        let fields_json: Vec<_> = fields.iter().map(|f| field_json(f, word_limit)).collect();
        return print_json(&json!({
            "template": {
                "name": selected.name,
                "file_name": selected.file_name,
            },
            "fields": fields_json,
            "count": fields.len(),
        }));
    }

    if fields.is_empty() {
        println!("{} No fields found in template", "!".yellow());
        return Ok(());
    }

    println!("{} {} field(s):", "✓".green().bold(), fields.len());
    println!();
    for field in fields {
        println!(
            "  {} {} {}",
            "•".cyan(),
            field.name().bold(),
            format!("({})", field.tag.kind).dimmed()
        );
        if !field.tag.options.is_empty() {
            println!("    Options: {}", field.tag.options.join(", "));
        }
        if let Some(count) = field.word_count {
            println!("    Long text: {}/{} words", count, word_limit);
        }
        if ctx.verbose {
            println!("    Placeholder: {}", field.tag.placeholder());
            if let Some(format) = &field.date_format {
                println!("    Date format: {}", format);
            }
        }
    }

    Ok(())
}

fn field_json(field: &FieldState, word_limit: usize) -> serde_json::Value {
    json!({
        "name": field.name(),
        "kind": field.tag.kind,
        "options": field.tag.options,
        "placeholder": field.tag.placeholder(),
        "long_text": field.is_long_text(),
        "word_count": field.word_count,
        "word_limit": field.is_long_text().then_some(word_limit),
        "default_value": field.value,
        "date_format": field.date_format,
    })
}
