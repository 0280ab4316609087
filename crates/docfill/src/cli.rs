//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docfill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to docfill.toml (defaults to ./docfill.toml when present)
    #[arg(short, long, global = true, env = "DOCFILL_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available templates
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show the fields a template asks for
    Fields {
        /// Template position (1-based), name or file name
        template: String,

        #[arg(long)]
        json: bool,
    },

    /// Show date formats and decimal-place choices
    Formats {
        #[arg(long)]
        json: bool,
    },

    /// Fill a template and write the report
    Generate(GenerateArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Template position (1-based), name or file name
    pub template: String,

    /// Field value as name=value (repeatable)
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,

    /// TOML or JSON file mapping field names to values
    #[arg(long = "values", value_name = "FILE")]
    pub values_file: Option<PathBuf>,

    /// Date format for one date field as name=label (repeatable)
    #[arg(short, long = "date-format", value_name = "NAME=LABEL", value_parser = parse_key_value)]
    pub date_format: Vec<(String, String)>,

    /// Fractional digits for number fields (0-5)
    #[arg(long)]
    pub decimals: Option<u8>,

    /// Output directory (overrides [output].dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub json: bool,
}

/// Split `name=value` at the first `=`
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}
