//! Synthetic record command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use view_lib::fixture::FleetFixture;
use view_lib::supply;

use crate::config::Config;
use crate::output::{print_json, print_success, OutputFormat};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of nodes (defaults to the configured generate_count)
    pub count: Option<usize>,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cluster every node belongs to
    #[arg(long, default_value = "General")]
    pub cluster: String,
}

/// Generate synthetic node records
pub fn run(args: GenerateArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let count = args.count.unwrap_or(config.generate_count);
    let fixture = FleetFixture::new().with_cluster_name(args.cluster);
    let records = match args.seed {
        Some(seed) => fixture.generate_seeded(count, seed),
        None => fixture.generate(count),
    };

    match args.output {
        Some(path) => {
            supply::save_records(&path, &records)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if format == OutputFormat::Table {
                print_success(&format!("Wrote {} nodes to {}", records.len(), path.display()));
            }
        }
        None => print_json(&records),
    }

    Ok(())
}
