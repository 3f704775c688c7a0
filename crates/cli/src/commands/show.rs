//! Node table command

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use tracing::debug;
use view_lib::{
    fixture, supply, Column, ModelIndex, NodeProxyModel, NodeRecord, NodeTableModel, ResetEvent,
    SortOrder, StructuredLogger, TableModel,
};

use crate::config::Config;
use crate::output::{print_json, print_model, print_warning, OutputFormat};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// JSON file of node records
    #[arg(long, short, conflicts_with = "generate")]
    pub input: Option<PathBuf>,

    /// Show this many synthetic nodes instead of reading a file
    #[arg(long, short)]
    pub generate: Option<usize>,

    /// Column to sort by (key, header label or position)
    #[arg(long, short)]
    pub sort: Option<String>,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,

    /// Keep rows whose COLUMN contains the words of TEXT, in order
    #[arg(long, value_name = "COLUMN=TEXT")]
    pub filter: Option<String>,
}

/// Show nodes through the sort/filter overlay
pub fn run(
    args: ShowArgs,
    config: &Config,
    format: OutputFormat,
    logger: &StructuredLogger,
) -> Result<()> {
    let records = load(&args, config, logger)?;

    let mut proxy = NodeProxyModel::new(NodeTableModel::new());
    let reset_logger = logger.clone();
    proxy.subscribe(Box::new(move |event: &ResetEvent| {
        reset_logger.log_reset(event.generation, event.row_count)
    }));

    let sort = match args.sort.as_deref().or(config.sort_column.as_deref()) {
        Some(name) => Some(parse_column(name)?),
        None => None,
    };
    if let Some(column) = sort {
        let descending = args.desc || config.descending;
        debug!(column = column.key(), descending = descending, "Sorting overlay");
        let order = if descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        proxy.sort(column, order);
    }

    if let Some(filter) = &args.filter {
        let (column, text) = parse_filter(filter)?;
        proxy.set_filter_text(column, text);
    }

    proxy.populate(records);

    let visible = proxy.row_count(&ModelIndex::root());
    let total = proxy.source().records().len();
    logger.log_overlay(visible, total, sort.map(Column::key), proxy.is_filtered());
    if proxy.is_filtered() && visible == 0 && total > 0 {
        print_warning(&format!("Filter hides all {} nodes", total));
    }

    match format {
        OutputFormat::Json => {
            let rows: Vec<&NodeRecord> = (0..visible).filter_map(|r| proxy.record_at(r)).collect();
            print_json(&rows);
        }
        OutputFormat::Table => print_model(&proxy),
    }

    Ok(())
}

fn load(args: &ShowArgs, config: &Config, logger: &StructuredLogger) -> Result<Vec<NodeRecord>> {
    match &args.input {
        Some(path) => {
            debug!(path = %path.display(), "Reading node records");
            let records = supply::load_records(path)
                .with_context(|| format!("Failed to load nodes from {}", path.display()))?;
            logger.log_records_loaded(&path.display().to_string(), records.len());
            Ok(records)
        }
        None => {
            let count = args.generate.unwrap_or(config.generate_count);
            debug!(count = count, "Generating synthetic nodes");
            let records = fixture::generate(count);
            logger.log_records_loaded("fixture", records.len());
            Ok(records)
        }
    }
}

fn parse_column(name: &str) -> Result<Column> {
    name.parse::<Column>().map_err(|e| anyhow!(e))
}

/// Split `COLUMN=TEXT` into its column and text
fn parse_filter(arg: &str) -> Result<(Column, &str)> {
    let Some((column, text)) = arg.split_once('=') else {
        bail!("filter '{}' must have the form COLUMN=TEXT", arg);
    };
    Ok((parse_column(column)?, text))
}
