//! Formats command - date formats and decimal choices

use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use docfill_core::format::{DEFAULT_DATE_FORMAT, DECIMAL_OPTIONS, DateFormat};
use serde_json::json;

pub fn run(json: bool) -> Result<()> {
    if json {
        let formats: Vec<_> = DateFormat::ALL
            .iter()
            .map(|f| json!({ "label": f.label(), "pattern": f.pattern() }))
            .collect();

        return print_json(&json!({
            "date_formats": formats,
            "default_date_format": DEFAULT_DATE_FORMAT,
            "decimal_options": DECIMAL_OPTIONS,
        }));
    }

    println!("{} Date formats:", "→".cyan());
    for format in DateFormat::ALL {
        let marker = if format.label() == DEFAULT_DATE_FORMAT {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {} {}{}", "•".cyan(), format.label(), marker);
    }

    println!();
    let options: Vec<String> = DECIMAL_OPTIONS.iter().map(u8::to_string).collect();
    println!("{} Decimal places: {}", "→".cyan(), options.join(", "));

    Ok(())
}
