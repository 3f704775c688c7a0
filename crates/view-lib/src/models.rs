//! Core data models for the node view
//!
//! A [`NodeRecord`] is one worker machine's status snapshot as reported by
//! the farm manager. The two enumerated domains, [`NodeState`] and
//! [`LockState`], carry their integer wire codes and their canonical labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operational state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeState {
    Up,
    Down,
    Repair,
    Reboot,
}

impl NodeState {
    /// Every declared member, in declaration order
    pub const MEMBERS: [NodeState; 4] = [
        NodeState::Up,
        NodeState::Down,
        NodeState::Repair,
        NodeState::Reboot,
    ];

    /// Integer code used by the farm manager's wire protocol
    pub fn code(self) -> i32 {
        match self {
            NodeState::Up => 0,
            NodeState::Down => 1,
            NodeState::Repair => 2,
            NodeState::Reboot => 3,
        }
    }
}

impl TryFrom<i32> for NodeState {
    type Error = RecordError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        NodeState::MEMBERS
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or(RecordError::UnknownCode {
                domain: "NODE_STATE",
                code,
            })
    }
}

impl FromStr for NodeState {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeState::MEMBERS
            .into_iter()
            .find(|m| crate::labels::node_state_label(*m).eq_ignore_ascii_case(s))
            .ok_or_else(|| RecordError::UnknownLabel {
                domain: "NODE_STATE",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::labels::node_state_label(*self))
    }
}

/// Whether a node accepts new work
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LockState {
    Open,
    Locked,
}

impl LockState {
    /// Every declared member, in declaration order
    pub const MEMBERS: [LockState; 2] = [LockState::Open, LockState::Locked];

    /// Integer code used by the farm manager's wire protocol
    pub fn code(self) -> i32 {
        match self {
            LockState::Open => 0,
            LockState::Locked => 1,
        }
    }
}

impl TryFrom<i32> for LockState {
    type Error = RecordError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        LockState::MEMBERS
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or(RecordError::UnknownCode {
                domain: "LOCK_STATE",
                code,
            })
    }
}

impl FromStr for LockState {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LockState::MEMBERS
            .into_iter()
            .find(|m| crate::labels::lock_state_label(*m).eq_ignore_ascii_case(s))
            .ok_or_else(|| RecordError::UnknownLabel {
                domain: "LOCK_STATE",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::labels::lock_state_label(*self))
    }
}

/// Status snapshot of a single worker node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub name: String,
    pub cluster_name: String,
    pub state: NodeState,
    pub lock_state: LockState,
    pub total_cores: i32,
    pub idle_cores: i32,
    /// Boot time in epoch seconds
    pub boot_time: i64,
    pub platform: String,
    pub cpu_model: String,
    pub total_ram_mb: i32,
    pub free_ram_mb: i32,
    pub total_swap_mb: i32,
    pub free_swap_mb: i32,
}

impl Default for NodeRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            cluster_name: String::new(),
            state: NodeState::Up,
            lock_state: LockState::Open,
            total_cores: 0,
            idle_cores: 0,
            boot_time: 0,
            platform: String::new(),
            cpu_model: String::new(),
            total_ram_mb: 0,
            free_ram_mb: 0,
            total_swap_mb: 0,
            free_swap_mb: 0,
        }
    }
}

impl NodeRecord {
    /// Check the record's data-model invariants
    ///
    /// Returns the first violation found. Uniqueness of `name` within a
    /// batch is expected but not checked here.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        if self.total_cores < 0 {
            return Err(RecordError::Negative {
                field: "totalCores",
                value: self.total_cores as i64,
            });
        }
        if self.boot_time < 0 {
            return Err(RecordError::Negative {
                field: "bootTime",
                value: self.boot_time,
            });
        }
        check_bounded("idleCores", self.idle_cores, "totalCores", self.total_cores)?;
        check_bounded("freeRamMb", self.free_ram_mb, "totalRamMb", self.total_ram_mb)?;
        check_bounded(
            "freeSwapMb",
            self.free_swap_mb,
            "totalSwapMb",
            self.total_swap_mb,
        )?;
        Ok(())
    }
}

/// Checks `0 <= part <= total`
fn check_bounded(
    field: &'static str,
    part: i32,
    bound: &'static str,
    total: i32,
) -> Result<(), RecordError> {
    if part < 0 {
        return Err(RecordError::Negative {
            field,
            value: part as i64,
        });
    }
    if part > total {
        return Err(RecordError::ExceedsTotal {
            field,
            value: part,
            bound,
            total,
        });
    }
    Ok(())
}

/// Violations of the node record data model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("node name must not be empty")]
    EmptyName,

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i64 },

    #[error("{field} ({value}) exceeds {bound} ({total})")]
    ExceedsTotal {
        field: &'static str,
        value: i32,
        bound: &'static str,
        total: i32,
    },

    #[error("unknown {domain} code {code}")]
    UnknownCode { domain: &'static str, code: i32 },

    #[error("unknown {domain} label '{label}'")]
    UnknownLabel { domain: &'static str, label: String },
}
