//! List command - show the template registry

use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use docfill_templates::TemplateRegistry;
use serde_json::json;
use std::path::Path;

/// List configured templates
///
/// # Arguments
///
/// * `config` - Explicit config file, if given
/// * `json` - Output as JSON if true
/// * `verbose` - Enable verbose output if true
pub fn run(config: Option<&Path>, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let registry = TemplateRegistry::from_config(&ctx.config.templates);

    if json {
        let templates: Vec<_> = registry
            .templates()
            .iter()
            .enumerate()
            .map(|(i, t)| {
                json!({
                    "index": i + 1,
                    "name": t.name,
                    "file_name": t.file_name,
                })
            })
            .collect();

        print_json(&json!({
            "source": ctx.config.templates.source,
            "templates": templates,
            "count": registry.len(),
        }))?;
        return Ok(());
    }

    println!("{} Templates:", "→".cyan());
    println!();
    for (i, template) in registry.templates().iter().enumerate() {
        println!("  {}. {}", i + 1, template.name.bold());
        if ctx.verbose {
            println!("     File: {}", template.file_name);
        }
    }
    println!();
    println!(
        "{} Total: {} template(s) from {}",
        "→".cyan(),
        registry.len(),
        ctx.config.templates.source
    );

    Ok(())
}
