//! Enum label resolution
//!
//! Every enumerated domain shown in the table has one exhaustive `match`
//! mapping each declared member to its canonical label. Adding a member to
//! [`NodeState`] or [`LockState`] does not compile until it has a label here.

use std::fmt;

use tracing::error;

use crate::models::{LockState, NodeState};
use crate::observability::ViewMetrics;

/// An enumerated domain known to the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    NodeState,
    LockState,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::NodeState, Domain::LockState];

    /// Symbolic domain name
    pub fn name(self) -> &'static str {
        match self {
            Domain::NodeState => "NODE_STATE",
            Domain::LockState => "LOCK_STATE",
        }
    }

    /// Every member of the domain, in declaration order
    pub fn members(self) -> Vec<EnumValue> {
        match self {
            Domain::NodeState => NodeState::MEMBERS.into_iter().map(EnumValue::Node).collect(),
            Domain::LockState => LockState::MEMBERS.into_iter().map(EnumValue::Lock).collect(),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value drawn from one of the enumerated domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumValue {
    Node(NodeState),
    Lock(LockState),
}

impl EnumValue {
    /// The domain this value is a member of
    pub fn domain(self) -> Domain {
        match self {
            EnumValue::Node(_) => Domain::NodeState,
            EnumValue::Lock(_) => Domain::LockState,
        }
    }
}

pub fn node_state_label(state: NodeState) -> &'static str {
    match state {
        NodeState::Up => "UP",
        NodeState::Down => "DOWN",
        NodeState::Repair => "REPAIR",
        NodeState::Reboot => "REBOOT",
    }
}

pub fn lock_state_label(state: LockState) -> &'static str {
    match state {
        LockState::Open => "OPEN",
        LockState::Locked => "LOCKED",
    }
}

/// Resolve the label of `value` within `domain`
///
/// A value that is not a member of the claimed domain means the column
/// registry and the data model have drifted apart. Debug builds panic;
/// release builds log the mismatch and return an empty label.
pub fn resolve(domain: Domain, value: EnumValue) -> &'static str {
    match (domain, value) {
        (Domain::NodeState, EnumValue::Node(state)) => node_state_label(state),
        (Domain::LockState, EnumValue::Lock(state)) => lock_state_label(state),
        (claimed, value) => {
            ViewMetrics::new().inc_domain_mismatches();
            error!(
                domain = %claimed,
                actual_domain = %value.domain(),
                value = ?value,
                "Enumerated value is not a member of the claimed domain"
            );
            debug_assert!(
                false,
                "{:?} is not a member of domain {}",
                value,
                claimed.name()
            );
            ""
        }
    }
}
