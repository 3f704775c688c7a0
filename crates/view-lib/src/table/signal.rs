//! Reset notifications
//!
//! A reset is the only change event a model emits: "everything changed".
//! Listeners run synchronously, in the order they subscribed.

use std::fmt;

/// Emitted once after each wholesale replacement of a model's records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetEvent {
    /// Incremented by every populate; row positions from an older
    /// generation are meaningless
    pub generation: u64,
    pub row_count: usize,
}

/// Handle returned by [`ResetSignal::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type ResetListener = Box<dyn FnMut(&ResetEvent)>;

/// Ordered list of reset listeners
#[derive(Default)]
pub struct ResetSignal {
    next_id: u64,
    listeners: Vec<(SubscriptionId, ResetListener)>,
}

impl ResetSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: ResetListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener, in subscription order
    pub fn emit(&mut self, event: &ResetEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ResetSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetSignal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
