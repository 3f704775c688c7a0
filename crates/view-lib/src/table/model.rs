use std::time::Instant;

use tracing::debug;

use super::signal::{ResetEvent, ResetListener, ResetSignal, SubscriptionId};
use super::{ItemRole, ModelIndex, Orientation, TableModel};
use crate::columns::{CellValue, Column, COLUMN_COUNT, HEADER_LABELS, REGISTRY};
use crate::models::NodeRecord;
use crate::observability::ViewMetrics;

/// Flat table adapter over a wholesale-replaced record store
///
/// Rows are positions in the current store; columns are positions in the
/// column registry. There is no row identity across [`populate`] calls.
///
/// [`populate`]: NodeTableModel::populate
#[derive(Debug)]
pub struct NodeTableModel {
    records: Vec<NodeRecord>,
    generation: u64,
    resets: ResetSignal,
    metrics: ViewMetrics,
}

impl Default for NodeTableModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTableModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            generation: 0,
            resets: ResetSignal::new(),
            metrics: ViewMetrics::new(),
        }
    }

    /// Replace every record, then notify each reset listener once
    pub fn populate(&mut self, records: Vec<NodeRecord>) -> ResetEvent {
        let started = Instant::now();

        self.records = records;
        self.generation += 1;

        let event = ResetEvent {
            generation: self.generation,
            row_count: self.records.len(),
        };
        self.resets.emit(&event);

        self.metrics
            .observe_reset(event.row_count, started.elapsed().as_secs_f64());
        debug!(
            generation = event.generation,
            rows = event.row_count,
            listeners = self.resets.len(),
            "Record store replaced"
        );
        event
    }

    /// The record at `row`, until the next populate
    pub fn record_at(&self, row: usize) -> Option<&NodeRecord> {
        self.records.get(row)
    }

    pub fn records(&self) -> &[NodeRecord] {
        &self.records
    }

    /// Number of completed populate calls
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Unformatted accessor value of a cell
    pub fn raw_value(&self, row: usize, column: Column) -> Option<CellValue<'_>> {
        self.record_at(row).map(|r| column.descriptor().raw(r))
    }
}

impl TableModel for NodeTableModel {
    fn row_count(&self, parent: &ModelIndex) -> usize {
        if parent.is_valid() {
            return 0;
        }
        self.records.len()
    }

    fn column_count(&self, parent: &ModelIndex) -> usize {
        if parent.is_valid() {
            return 0;
        }
        COLUMN_COUNT
    }

    fn cell_value(&self, index: &ModelIndex, role: ItemRole) -> Option<String> {
        if role != ItemRole::Display {
            return None;
        }
        let (row, column) = index.position()?;
        let record = self.records.get(row)?;
        let descriptor = REGISTRY.get(column)?;
        Some(descriptor.display(record))
    }

    fn header_label(
        &self,
        section: usize,
        orientation: Orientation,
        role: ItemRole,
    ) -> Option<&str> {
        if orientation != Orientation::Horizontal || role != ItemRole::Display {
            return None;
        }
        HEADER_LABELS.get(section).copied()
    }

    fn subscribe(&mut self, listener: ResetListener) -> SubscriptionId {
        self.resets.subscribe(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.resets.unsubscribe(id)
    }
}
