//! Node View CLI
//!
//! Renders render farm node status as a terminal table, backed by the
//! same table models a graphical view would consume.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{columns, generate, show};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use view_lib::{StructuredLogger, ViewMetrics, COLUMN_COUNT};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Node View CLI
#[derive(Parser)]
#[command(name = "nodeview")]
#[command(author, version, about = "Terminal view of render farm nodes", long_about = None)]
pub struct Cli {
    /// Output format (overrides the configured default)
    #[arg(long, short, global = true)]
    pub format: Option<output::OutputFormat>,

    /// Path to a JSON config file (defaults to ~/.config/nodeview/config.json)
    #[arg(long, env = "NODEVIEW_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print Prometheus metrics to stderr after the command
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show nodes as a sorted, filtered table
    Show(show::ShowArgs),

    /// Write synthetic node records as JSON
    Generate(generate::GenerateArgs),

    /// List the table columns
    Columns,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, cli.log_json || config.log_json);

    let logger = StructuredLogger::new("nodeview");
    logger.log_startup(VERSION, COLUMN_COUNT);

    let format = cli.format.unwrap_or(config.default_format);

    match cli.command {
        Commands::Show(args) => show::run(args, &config, format, &logger)?,
        Commands::Generate(args) => generate::run(args, &config, format)?,
        Commands::Columns => columns::run(format)?,
    }

    if cli.metrics {
        eprint!("{}", ViewMetrics::new().render());
    }

    Ok(())
}
