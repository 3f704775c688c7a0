//! Node view library for render farm monitoring
//!
//! This crate provides the core functionality for:
//! - Node records and their enumerated state domains
//! - The fixed column registry shared by every table
//! - A flat table adapter with reset notifications
//! - A sort and filter overlay over that adapter
//! - Synthetic fleets and record file loading
//! - Metrics and structured logging

pub mod columns;
pub mod fixture;
pub mod labels;
pub mod models;
pub mod observability;
pub mod supply;
pub mod table;

pub use columns::{CellValue, Column, ColumnDescriptor, COLUMN_COUNT, HEADER_LABELS};
pub use labels::{Domain, EnumValue};
pub use models::*;
pub use observability::{StructuredLogger, ViewMetrics};
pub use supply::SupplyError;
pub use table::{
    ItemRole, ModelIndex, NodeProxyModel, NodeTableModel, Orientation, ResetEvent, SortOrder,
    TableModel,
};
