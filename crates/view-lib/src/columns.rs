//! Column registry
//!
//! The displayed attributes of a [`NodeRecord`] are declared once as an
//! ordered table of (accessor, formatter) pairs. Position in [`REGISTRY`]
//! is the on-screen column order. Adding a column means adding one
//! [`Column`] variant, one descriptor and one header label; the table
//! model's indexing code does not change.

use std::fmt;
use std::str::FromStr;

use crate::labels::{self, Domain, EnumValue};
use crate::models::NodeRecord;

/// Number of columns in the registry
pub const COLUMN_COUNT: usize = 13;

/// Raw value produced by a column accessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellValue<'a> {
    Text(&'a str),
    Integer(i64),
    /// An enumerated value together with the domain the column claims for it
    Enum(Domain, EnumValue),
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Enum(domain, value) => f.write_str(labels::resolve(*domain, *value)),
        }
    }
}

/// Stable identifier of a registered column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Column {
    Name,
    Platform,
    CpuModel,
    Cluster,
    State,
    LockState,
    TotalCores,
    IdleCores,
    TotalRamMb,
    FreeRamMb,
    TotalSwapMb,
    FreeSwapMb,
    BootTime,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Name,
        Column::Platform,
        Column::CpuModel,
        Column::Cluster,
        Column::State,
        Column::LockState,
        Column::TotalCores,
        Column::IdleCores,
        Column::TotalRamMb,
        Column::FreeRamMb,
        Column::TotalSwapMb,
        Column::FreeSwapMb,
        Column::BootTime,
    ];

    /// Display position of this column
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Column> {
        Column::ALL.get(index).copied()
    }

    pub fn descriptor(self) -> &'static ColumnDescriptor {
        &REGISTRY[self.index()]
    }

    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    pub fn header(self) -> &'static str {
        HEADER_LABELS[self.index()]
    }
}

impl FromStr for Column {
    type Err = String;

    /// Accepts a column key (`idle_cores`), its header label (`Idle Cores`)
    /// or its position
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Ok(index) = wanted.parse::<usize>() {
            return Column::from_index(index).ok_or_else(|| format!("no column at position {}", index));
        }
        Column::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(wanted) || c.header().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown column '{}'", wanted))
    }
}

/// Declaration of one table column
pub struct ColumnDescriptor {
    pub column: Column,
    /// Machine-friendly name, used on the command line and in config
    pub key: &'static str,
    pub accessor: fn(&NodeRecord) -> CellValue<'_>,
    pub formatter: fn(&CellValue<'_>) -> String,
}

impl ColumnDescriptor {
    /// Apply accessor then formatter to `record`
    pub fn display(&self, record: &NodeRecord) -> String {
        (self.formatter)(&(self.accessor)(record))
    }

    pub fn raw<'a>(&self, record: &'a NodeRecord) -> CellValue<'a> {
        (self.accessor)(record)
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("column", &self.column)
            .field("key", &self.key)
            .finish()
    }
}

/// Header labels, parallel to [`REGISTRY`]
pub const HEADER_LABELS: [&str; COLUMN_COUNT] = [
    "Name",
    "Platform",
    "CPU Model",
    "Cluster",
    "State",
    "Lock State",
    "Total Cores",
    "Idle Cores",
    "Total RAM (MB)",
    "Free RAM (MB)",
    "Total Swap (MB)",
    "Free Swap (MB)",
    "Boot Time",
];

const DESCRIPTORS: [ColumnDescriptor; COLUMN_COUNT] = [
    ColumnDescriptor {
        column: Column::Name,
        key: "name",
        accessor: accessors::name,
        formatter: format_text,
    },
    ColumnDescriptor {
        column: Column::Platform,
        key: "platform",
        accessor: accessors::platform,
        formatter: format_text,
    },
    ColumnDescriptor {
        column: Column::CpuModel,
        key: "cpu_model",
        accessor: accessors::cpu_model,
        formatter: format_text,
    },
    ColumnDescriptor {
        column: Column::Cluster,
        key: "cluster",
        accessor: accessors::cluster_name,
        formatter: format_text,
    },
    ColumnDescriptor {
        column: Column::State,
        key: "state",
        accessor: accessors::node_state,
        formatter: format_label,
    },
    ColumnDescriptor {
        column: Column::LockState,
        key: "lock_state",
        accessor: accessors::lock_state,
        formatter: format_label,
    },
    ColumnDescriptor {
        column: Column::TotalCores,
        key: "total_cores",
        accessor: accessors::total_cores,
        formatter: format_integer,
    },
    ColumnDescriptor {
        column: Column::IdleCores,
        key: "idle_cores",
        accessor: accessors::idle_cores,
        formatter: format_integer,
    },
    ColumnDescriptor {
        column: Column::TotalRamMb,
        key: "total_ram_mb",
        accessor: accessors::total_ram_mb,
        formatter: format_integer,
    },
    ColumnDescriptor {
        column: Column::FreeRamMb,
        key: "free_ram_mb",
        accessor: accessors::free_ram_mb,
        formatter: format_integer,
    },
    ColumnDescriptor {
        column: Column::TotalSwapMb,
        key: "total_swap_mb",
        accessor: accessors::total_swap_mb,
        formatter: format_integer,
    },
    ColumnDescriptor {
        column: Column::FreeSwapMb,
        key: "free_swap_mb",
        accessor: accessors::free_swap_mb,
        formatter: format_integer,
    },
    ColumnDescriptor {
        column: Column::BootTime,
        key: "boot_time",
        accessor: accessors::boot_time,
        formatter: format_integer,
    },
];

// Every descriptor sits at the position its `Column` names.
const _: () = {
    let mut i = 0;
    while i < COLUMN_COUNT {
        assert!(
            DESCRIPTORS[i].column as usize == i,
            "column registry out of order"
        );
        i += 1;
    }
};

/// The column registry, in display order
pub static REGISTRY: [ColumnDescriptor; COLUMN_COUNT] = DESCRIPTORS;

fn format_text(value: &CellValue<'_>) -> String {
    match value {
        CellValue::Text(s) => (*s).to_string(),
        other => other.to_string(),
    }
}

fn format_integer(value: &CellValue<'_>) -> String {
    match value {
        CellValue::Integer(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn format_label(value: &CellValue<'_>) -> String {
    match value {
        CellValue::Enum(domain, value) => labels::resolve(*domain, *value).to_string(),
        other => other.to_string(),
    }
}

mod accessors {
    use super::CellValue;
    use crate::labels::{Domain, EnumValue};
    use crate::models::NodeRecord;

    pub(super) fn name(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Text(&n.name)
    }

    pub(super) fn platform(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Text(&n.platform)
    }

    pub(super) fn cpu_model(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Text(&n.cpu_model)
    }

    pub(super) fn cluster_name(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Text(&n.cluster_name)
    }

    pub(super) fn node_state(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Enum(Domain::NodeState, EnumValue::Node(n.state))
    }

    pub(super) fn lock_state(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Enum(Domain::LockState, EnumValue::Lock(n.lock_state))
    }

    pub(super) fn total_cores(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Integer(n.total_cores.into())
    }

    pub(super) fn idle_cores(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Integer(n.idle_cores.into())
    }

    pub(super) fn total_ram_mb(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Integer(n.total_ram_mb.into())
    }

    pub(super) fn free_ram_mb(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Integer(n.free_ram_mb.into())
    }

    pub(super) fn total_swap_mb(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Integer(n.total_swap_mb.into())
    }

    pub(super) fn free_swap_mb(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Integer(n.free_swap_mb.into())
    }

    pub(super) fn boot_time(n: &NodeRecord) -> CellValue<'_> {
        CellValue::Integer(n.boot_time)
    }
}
