//! Generate command - fill a template and write the report

use crate::cli::GenerateArgs;
use crate::context::Context;
use crate::output::print_json;
use anyhow::{Context as _, Result, bail};
use chrono::Utc;
use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Fill the form from the command line and render the report
///
/// Values from `--values` are applied first, then each `--set`, so the
/// command line wins.
pub fn run(config: Option<&Path>, args: GenerateArgs, verbose: bool) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let mut session = ctx.session()?;

    let index = session.registry().find(&args.template)?;
    session.select(index)?;

    let values = session.values_mut()?;
    let mut truncated = Vec::new();
    if let Some(path) = &args.values_file {
        for (name, value) in load_values(path)? {
            if values.set_value(&name, value)? {
                truncated.push(name);
            }
        }
    }
    for (name, value) in &args.set {
        if values.set_value(name, value.as_str())? {
            truncated.push(name.clone());
        }
    }
    if !args.json {
        for name in &truncated {
            println!(
                "{} '{}' limited to {} words",
                "!".yellow(),
                name,
                values.word_limit()
            );
        }
    }
    for (name, label) in &args.date_format {
        values.set_date_format(name, label)?;
    }
    if let Some(places) = args.decimals {
        values.set_decimal_places(places)?;
    }

    let report = session.generate(Utc::now())?;

    let dir = args.output.clone().unwrap_or_else(|| ctx.output_dir());
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(&report.file_name);
    fs::write(&path, &report.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), bytes = report.bytes.len(), "wrote report");

    if args.json {
        return print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "file_name": report.file_name,
            "replacements": report.replacements,
            "truncated": truncated,
        }));
    }

    println!("{} Generated {}", "✓".green().bold(), path.display());
    if verbose {
        println!();
        println!("{} Replacements:", "→".cyan());
        for (name, value) in report.replacements.iter() {
            println!("  {} = {}", name.bold(), value);
        }
    }

    Ok(())
}

/// Read field values from a TOML or JSON file, chosen by extension
fn load_values(path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read values file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        map.into_iter()
            .map(|(name, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    other => bail!("field '{}' must be a scalar, got {}", name, other),
                };
                Ok((name, text))
            })
            .collect()
    } else {
        let table: toml::Table = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;
        table
            .into_iter()
            .map(|(name, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    toml::Value::Datetime(d) => d.to_string(),
                    other => bail!("field '{}' must be a scalar, got {}", name, other),
                };
                Ok((name, text))
            })
            .collect()
    }
}
