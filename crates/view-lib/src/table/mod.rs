//! Table models over node records
//!
//! This module provides:
//! - [`TableModel`]: the read contract a table-rendering surface consumes
//! - [`NodeTableModel`]: the flat adapter projecting a record store through
//!   the column registry
//! - [`NodeProxyModel`]: a sort/filter overlay indexing into an adapter
//! - [`ResetSignal`]: explicit subscription to whole-table reset events
//!
//! Everything here is driven from a single view thread. The only mutation
//! is a wholesale replacement of the record store, announced to every
//! subscriber by one [`ResetEvent`].

mod model;
mod proxy;
mod signal;


pub use model::NodeTableModel;
pub use proxy::{NodeProxyModel, RowPredicate, SortOrder};
pub use signal::{ResetEvent, ResetListener, ResetSignal, SubscriptionId};

/// Position of a cell in a table model
///
/// Rendering surfaces that speak signed indices can hand them over with
/// [`ModelIndex::from_raw`]; negative positions are simply invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelIndex {
    row: isize,
    column: isize,
}

impl ModelIndex {
    /// The invisible root every top-level row hangs off
    pub const fn root() -> Self {
        Self::invalid()
    }

    pub const fn invalid() -> Self {
        Self { row: -1, column: -1 }
    }

    pub fn new(row: usize, column: usize) -> Self {
        match (isize::try_from(row), isize::try_from(column)) {
            (Ok(row), Ok(column)) => Self { row, column },
            _ => Self::invalid(),
        }
    }

    pub const fn from_raw(row: isize, column: isize) -> Self {
        Self { row, column }
    }

    pub fn row(&self) -> isize {
        self.row
    }

    pub fn column(&self) -> isize {
        self.column
    }

    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.column >= 0
    }

    /// Unsigned (row, column), if both are non-negative
    pub fn position(&self) -> Option<(usize, usize)> {
        Some((
            usize::try_from(self.row).ok()?,
            usize::try_from(self.column).ok()?,
        ))
    }
}

/// The kind of data requested from a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// Text to render
    Display,
    Decoration,
    Edit,
    ToolTip,
    Background,
    Foreground,
    TextAlignment,
    User(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Read contract of a flat table
///
/// Out-of-range positions and roles a model does not serve yield `None`;
/// a bad index never aborts a render pass.
pub trait TableModel {
    /// Number of rows under `parent`. Flat models report 0 for any valid parent.
    fn row_count(&self, parent: &ModelIndex) -> usize;

    /// Number of columns under `parent`
    fn column_count(&self, parent: &ModelIndex) -> usize;

    fn cell_value(&self, index: &ModelIndex, role: ItemRole) -> Option<String>;

    fn header_label(&self, section: usize, orientation: Orientation, role: ItemRole)
        -> Option<&str>;

    /// Register a listener for whole-table resets. Listeners are called in
    /// registration order.
    fn subscribe(&mut self, listener: ResetListener) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Index of the cell at (`row`, `column`), or an invalid index when out of range
    fn index(&self, row: usize, column: usize) -> ModelIndex {
        let root = ModelIndex::root();
        if row < self.row_count(&root) && column < self.column_count(&root) {
            ModelIndex::new(row, column)
        } else {
            ModelIndex::invalid()
        }
    }

    /// Display text of the cell at (`row`, `column`)
    fn display_text(&self, row: usize, column: usize) -> Option<String> {
        self.cell_value(&ModelIndex::new(row, column), ItemRole::Display)
    }
}
