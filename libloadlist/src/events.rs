//! State change notifications
//!
//! The store publishes a [`StateChange`] on every commit, including commits
//! that leave the state unchanged, so observers must tolerate no-op updates.
//!
//! # Architecture
//!
//! The bus uses `tokio::sync::broadcast` for multi-subscriber support. If no
//! subscribers exist, changes are dropped without blocking the store. A
//! subscriber that falls more than `capacity` changes behind skips ahead and
//! sees `RecvError::Lagged`; it can always re-read the latest state from the
//! next change it receives.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::app::{Action, AppState};

/// Receiver type alias
pub type StateReceiver = broadcast::Receiver<StateChange>;

/// One committed transition
#[derive(Debug, Clone, Serialize)]
pub struct StateChange {
    /// Increases by one per commit, starting at 1
    pub revision: u64,
    /// The action that produced this commit
    pub action: Action,
    /// State after the commit
    pub state: AppState,
}

/// Broadcast channel for committed states
#[derive(Clone)]
pub struct StateBus {
    sender: broadcast::Sender<StateChange>,
}

impl StateBus {
    /// `capacity` is clamped to at least 1
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> StateReceiver {
        self.sender.subscribe()
    }

    pub fn publish(&self, change: StateChange) {
        // Err only means nobody is listening
        let _ = self.sender.send(change);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
