//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    build::BuildArgs, catalog::CatalogCommands, completions::CompletionsArgs,
    config::ConfigCommands, import::ImportArgs, init::InitArgs, wire::WireCommands,
};

#[derive(Parser)]
#[command(name = "chd")]
#[command(author, version, about = "Connector and harness design tools")]
#[command(long_about = "Configure Glenair Series 80 connector part numbers from a local reference catalog.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .chd/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new CHD project with an empty catalog
    Init(InitArgs),

    /// Build a Series 80 connector part number
    Build(BuildArgs),

    /// Browse the reference catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Import catalog tables from CSV files
    Import(ImportArgs),

    /// Wire size conversion (AWG / mm²)
    #[command(subcommand)]
    Wire(WireCommands),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (tables on a terminal)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just identifiers, one per line
    Id,
}

impl OutputFormat {
    /// Resolve `auto` against the configured default format
    pub fn resolve(self, configured: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        configured
            .and_then(|s| OutputFormat::from_str(s, true).ok())
            .unwrap_or(OutputFormat::Auto)
    }
}
