//! Column listing command

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use view_lib::Column;

use crate::output::{print_table, OutputFormat};

/// Row for the column table
#[derive(Tabled, Serialize)]
struct ColumnRow {
    #[tabled(rename = "Position")]
    position: usize,
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Header")]
    header: &'static str,
}

/// List the table columns in display order
pub fn run(format: OutputFormat) -> Result<()> {
    let rows: Vec<ColumnRow> = Column::ALL
        .into_iter()
        .map(|column| ColumnRow {
            position: column.index(),
            key: column.key(),
            header: column.header(),
        })
        .collect();

    print_table(&rows, format);
    Ok(())
}
