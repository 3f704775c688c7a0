//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tabled::{builder::Builder, settings::Style, Table, Tabled};
use view_lib::{Column, ItemRole, ModelIndex, Orientation, TableModel};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a table from a list of items
pub fn print_table<T: Tabled + Serialize>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("{}", "No items found".yellow());
                return;
            }
            let table = Table::new(items).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => print_json(&items),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

/// Render every row of `model` under its horizontal headers
pub fn render_model(model: &impl TableModel) -> String {
    let root = ModelIndex::root();
    let columns = model.column_count(&root);
    let mut builder = Builder::default();

    builder.push_record((0..columns).map(|c| {
        model
            .header_label(c, Orientation::Horizontal, ItemRole::Display)
            .unwrap_or_default()
            .bold()
            .to_string()
    }));

    for row in 0..model.row_count(&root) {
        builder.push_record((0..columns).map(|c| {
            let text = model.display_text(row, c).unwrap_or_default();
            match Column::from_index(c) {
                Some(Column::State) | Some(Column::LockState) => color_state(&text),
                _ => text,
            }
        }));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Print a model as a table, or a note when it has no rows
pub fn print_model(model: &impl TableModel) {
    if model.row_count(&ModelIndex::root()) == 0 {
        println!("{}", "No nodes found".yellow());
        return;
    }
    println!("{}", render_model(model));
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Color a node or lock state label
pub fn color_state(label: &str) -> String {
    match label {
        "UP" | "OPEN" => label.green().to_string(),
        "DOWN" => label.red().to_string(),
        "REPAIR" => label.yellow().to_string(),
        "REBOOT" => label.blue().to_string(),
        "LOCKED" => label.purple().to_string(),
        _ => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use view_lib::{LockState, NodeRecord, NodeState, NodeTableModel};

    #[test]
    fn test_color_state_keeps_text() {
        colored::control::set_override(false);
        assert_eq!(color_state("DOWN"), "DOWN");
        assert_eq!(color_state("unknown"), "unknown");
    }

    #[test]
    fn test_render_model() {
        colored::control::set_override(false);
        let mut model = NodeTableModel::new();
        model.populate(vec![NodeRecord {
            name: "render-01".to_string(),
            state: NodeState::Reboot,
            lock_state: LockState::Locked,
            total_cores: 8,
            idle_cores: 3,
            ..Default::default()
        }]);

        let rendered = render_model(&model);
        assert!(rendered.contains("Lock State"));
        assert!(rendered.contains("render-01"));
        assert!(rendered.contains("REBOOT"));
        assert!(rendered.contains("LOCKED"));
    }
}
