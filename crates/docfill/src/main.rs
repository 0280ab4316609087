mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Library crates logged at debug under `--verbose`
const VERBOSE_FILTER: &str = "warn,docfill=debug,docfill_core=debug,docfill_templates=debug";

/// Install the stderr log subscriber; `RUST_LOG` overrides the defaults
fn init_tracing(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::List { json } => commands::list::run(config, json, cli.verbose),
        Commands::Fields { template, json } => {
            commands::fields::run(config, &template, json, cli.verbose)
        }
        Commands::Formats { json } => commands::formats::run(json),
        Commands::Generate(args) => commands::generate::run(config, args, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
