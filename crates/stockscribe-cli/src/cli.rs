//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stockscribe_domain::SourceType;

/// Stockscribe - turn spoken stock counts and invoices into inventory updates.
#[derive(Debug, Parser)]
#[command(name = "stockscribe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "STOCKSCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database path (overrides the config file)
    #[arg(long, global = true, env = "STOCKSCRIBE_DB")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one line per item)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract items from a text file and print them
    Extract(ExtractArgs),

    /// Extract, reconcile and save a batch to the database
    Reconcile(ReconcileArgs),

    /// Review extracted items interactively before saving
    Review(ReviewArgs),

    /// Manage the product catalog
    Catalog(CatalogArgs),
}

/// Where the text comes from and how to read it.
#[derive(Debug, Clone, clap::Args)]
pub struct InputArgs {
    /// Text file holding a transcript or OCR output
    #[arg(long)]
    pub file: PathBuf,

    /// Kind of text in the file
    #[arg(short, long, value_enum, default_value = "voice")]
    pub source: SourceArg,

    /// Language tag of the text
    #[arg(short, long, default_value = "en")]
    pub lang: String,

    /// JSON catalog to match against instead of the database
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the reconcile command.
#[derive(Debug, Parser)]
pub struct ReconcileArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Location used for items that name none
    #[arg(long)]
    pub location: String,

    /// Also save items still flagged for review
    #[arg(long)]
    pub include_unconfirmed: bool,
}

/// Arguments for the review command.
#[derive(Debug, Parser)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Location of the stock count
    #[arg(long)]
    pub location: String,

    /// Period label, e.g. 2026-10
    #[arg(long)]
    pub period: String,
}

/// Arguments for catalog management.
#[derive(Debug, Parser)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub action: CatalogAction,
}

/// Catalog management actions.
#[derive(Debug, Subcommand)]
pub enum CatalogAction {
    /// Import products from a JSON file
    Import {
        /// JSON array of catalog entries
        #[arg(long)]
        file: PathBuf,
    },

    /// List all products
    List,

    /// Show the latest saved inventory updates
    History {
        /// Maximum number of rows
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

/// Source type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SourceArg {
    /// Voice transcript
    Voice,
    /// Invoice OCR text
    Invoice,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<SourceArg> for SourceType {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Voice => SourceType::Voice,
            SourceArg::Invoice => SourceType::Invoice,
        }
    }
}
