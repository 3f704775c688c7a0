use std::cell::{Cell, Ref, RefCell};
use std::cmp::Ordering;
use std::rc::Rc;

use tracing::debug;

use super::model::NodeTableModel;
use super::signal::{ResetEvent, ResetListener, ResetSignal, SubscriptionId};
use super::{ItemRole, ModelIndex, Orientation, TableModel};
use crate::columns::Column;
use crate::models::NodeRecord;

pub type RowPredicate = Box<dyn Fn(&NodeRecord) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort and filter overlay over a [`NodeTableModel`]
///
/// The overlay never copies records: it keeps a mapping from its own row
/// positions to source row positions. Sorting compares raw accessor values,
/// so numeric columns sort numerically and enumerated columns sort in
/// declaration order. Ties keep source order.
///
/// Resets of the source are forwarded to the overlay's own subscribers, and
/// the mapping is rebuilt on the first query after a reset, sort or filter
/// change.
pub struct NodeProxyModel {
    source: NodeTableModel,
    sort: Option<(Column, SortOrder)>,
    filter: Option<RowPredicate>,
    mapping: RefCell<Vec<usize>>,
    /// Source generation the mapping was built for; `None` when stale
    mapped_generation: Cell<Option<u64>>,
    resets: Rc<RefCell<ResetSignal>>,
    forwarding: SubscriptionId,
}

impl NodeProxyModel {
    /// Wrap `source`, subscribing ahead of any listener registered later
    pub fn new(mut source: NodeTableModel) -> Self {
        let resets = Rc::new(RefCell::new(ResetSignal::new()));
        let forward = resets.clone();
        let forwarding = source.subscribe(Box::new(move |event: &ResetEvent| {
            forward.borrow_mut().emit(event);
        }));

        Self {
            source,
            sort: None,
            filter: None,
            mapping: RefCell::new(Vec::new()),
            mapped_generation: Cell::new(None),
            resets,
            forwarding,
        }
    }

    pub fn source(&self) -> &NodeTableModel {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut NodeTableModel {
        &mut self.source
    }

    /// Unwrap the overlay, detaching it from the source's reset signal
    pub fn into_source(mut self) -> NodeTableModel {
        self.source.unsubscribe(self.forwarding);
        self.source
    }

    /// Replace the source's records; the reset reaches overlay subscribers
    pub fn populate(&mut self, records: Vec<NodeRecord>) -> ResetEvent {
        self.source.populate(records)
    }

    pub fn sort(&mut self, column: Column, order: SortOrder) {
        self.sort = Some((column, order));
        self.invalidate();
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.invalidate();
    }

    pub fn sort_column(&self) -> Option<(Column, SortOrder)> {
        self.sort
    }

    /// Show only records for which `predicate` holds
    pub fn set_filter(&mut self, predicate: impl Fn(&NodeRecord) -> bool + 'static) {
        self.filter = Some(Box::new(predicate));
        self.invalidate();
    }

    /// Show only records whose display text in `column` contains every
    /// whitespace-separated word of `text`, in order, ignoring case.
    /// Blank text clears the filter.
    pub fn set_filter_text(&mut self, column: Column, text: &str) {
        let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() {
            self.clear_filter();
            return;
        }
        let descriptor = column.descriptor();
        self.set_filter(move |record| {
            let haystack = descriptor.display(record).to_lowercase();
            contains_in_order(&haystack, &words)
        });
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.invalidate();
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    /// Source row shown at overlay row `row`
    pub fn map_to_source(&self, row: usize) -> Option<usize> {
        self.mapping().get(row).copied()
    }

    /// Overlay row showing source row `source_row`, if it passes the filter
    pub fn map_from_source(&self, source_row: usize) -> Option<usize> {
        self.mapping().iter().position(|&r| r == source_row)
    }

    /// The record shown at overlay row `row`, until the next populate
    pub fn record_at(&self, row: usize) -> Option<&NodeRecord> {
        let source_row = self.map_to_source(row)?;
        self.source.record_at(source_row)
    }

    fn invalidate(&self) {
        self.mapped_generation.set(None);
    }

    fn mapping(&self) -> Ref<'_, Vec<usize>> {
        let generation = self.source.generation();
        if self.mapped_generation.get() != Some(generation) {
            let rebuilt = self.build_mapping();
            debug!(
                generation = generation,
                visible = rebuilt.len(),
                total = self.source.records().len(),
                "Rebuilt overlay mapping"
            );
            *self.mapping.borrow_mut() = rebuilt;
            self.mapped_generation.set(Some(generation));
        }
        self.mapping.borrow()
    }

    fn build_mapping(&self) -> Vec<usize> {
        let records = self.source.records();
        let mut rows: Vec<usize> = match &self.filter {
            Some(predicate) => (0..records.len())
                .filter(|&i| predicate(&records[i]))
                .collect(),
            None => (0..records.len()).collect(),
        };

        if let Some((column, order)) = self.sort {
            rows.sort_by(|&a, &b| {
                let ordering = compare_rows(&records[a], &records[b], column);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }
}

fn contains_in_order(haystack: &str, words: &[String]) -> bool {
    let mut rest = haystack;
    for word in words {
        match rest.find(word.as_str()) {
            Some(at) => rest = &rest[at + word.len()..],
            None => return false,
        }
    }
    true
}

impl TableModel for NodeProxyModel {
    fn row_count(&self, parent: &ModelIndex) -> usize {
        if parent.is_valid() {
            return 0;
        }
        self.mapping().len()
    }

    fn column_count(&self, parent: &ModelIndex) -> usize {
        self.source.column_count(parent)
    }

    fn cell_value(&self, index: &ModelIndex, role: ItemRole) -> Option<String> {
        let (row, column) = index.position()?;
        let source_row = self.map_to_source(row)?;
        self.source
            .cell_value(&ModelIndex::new(source_row, column), role)
    }

    fn header_label(
        &self,
        section: usize,
        orientation: Orientation,
        role: ItemRole,
    ) -> Option<&str> {
        self.source.header_label(section, orientation, role)
    }

    fn subscribe(&mut self, listener: ResetListener) -> SubscriptionId {
        self.resets.borrow_mut().subscribe(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.resets.borrow_mut().unsubscribe(id)
    }
}

impl std::fmt::Debug for NodeProxyModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeProxyModel")
            .field("source", &self.source)
            .field("sort", &self.sort)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

/// Ascending order of two records by the raw value of `column`
fn compare_rows(a: &NodeRecord, b: &NodeRecord, column: Column) -> Ordering {
    let descriptor = column.descriptor();
    descriptor.raw(a).cmp(&descriptor.raw(b))
}
