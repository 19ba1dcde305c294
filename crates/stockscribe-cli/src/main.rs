//! Stockscribe CLI - turn stock-count transcripts and invoices into inventory updates.

use clap::Parser;
use stockscribe_cli::commands;
use stockscribe_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing (log to stderr, RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> stockscribe_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(database) = cli.database {
        config.settings.database = Some(database);
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter),
        Command::Reconcile(args) => commands::execute_reconcile(args, &config, &formatter),
        Command::Review(args) => commands::execute_review(args, &config, &formatter),
        Command::Catalog(args) => commands::execute_catalog(args, &config, &formatter),
    }
}
