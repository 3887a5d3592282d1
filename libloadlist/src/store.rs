//! The store: owner of the single application state
//!
//! Every action, whether it comes from the presentation layer or from a
//! settled effect, goes through [`Store::dispatch`]. Callers outside the
//! store's own task hold a [`StoreHandle`], which enqueues onto the store's
//! inbox; the store drains that inbox on its own thread of control, so
//! reducer calls never overlap.
//!
//! # Example
//!
//! ```no_run
//! use libloadlist::{Action, Config, Store};
//!
//! # async fn example() {
//! let mut store = Store::from_config(&Config::default());
//! let mut changes = store.subscribe();
//!
//! store.dispatch(Action::RepositoryLoad);
//! store.settle().await;
//!
//! assert!(store.state().items.is_loaded());
//! # let _ = changes.try_recv();
//! # }
//! ```

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::app::{reduce, Action, AppState};
use crate::config::Config;
use crate::effects::{DelayedRepository, EffectRunner};
use crate::error::{LoadListError, Result};
use crate::events::{StateBus, StateChange, StateReceiver};

/// Cloneable entry point for dispatching into a [`Store`] from elsewhere
///
/// Actions are queued and applied in the order the store receives them.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    inbox: mpsc::UnboundedSender<Action>,
}

impl StoreHandle {
    /// Queue `action` for the store
    ///
    /// # Errors
    ///
    /// Returns [`LoadListError::StoreClosed`] once the store has been dropped.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.inbox
            .send(action)
            .map_err(|_| LoadListError::StoreClosed)
    }
}

pub struct Store {
    state: AppState,
    revision: u64,
    runner: EffectRunner,
    bus: StateBus,
    inbox_tx: mpsc::UnboundedSender<Action>,
    inbox_rx: mpsc::UnboundedReceiver<Action>,
}

impl Store {
    pub fn new(initial_state: AppState, runner: EffectRunner, event_capacity: usize) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state: initial_state,
            revision: 0,
            runner,
            bus: StateBus::new(event_capacity),
            inbox_tx,
            inbox_rx,
        }
    }

    /// Store in its initial state, fetching from a [`DelayedRepository`] built from `config`
    pub fn from_config(config: &Config) -> Self {
        let repository = DelayedRepository::from_config(&config.fetch);
        Self::new(
            AppState::new(),
            EffectRunner::new(Arc::new(repository)),
            config.store.event_capacity,
        )
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of commits so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn handle(&self) -> StoreHandle {
        StoreHandle {
            inbox: self.inbox_tx.clone(),
        }
    }

    pub fn subscribe(&self) -> StateReceiver {
        self.bus.subscribe()
    }

    /// Effects scheduled by this store's runner that have not delivered yet
    pub fn effects_in_flight(&self) -> usize {
        self.runner.in_flight()
    }

    /// Reduce, commit, publish, then hand any command to the effect runner
    ///
    /// A command's follow-up action arrives later through the inbox. Commands
    /// need a tokio runtime to run; outside one they are logged and dropped.
    pub fn dispatch(&mut self, action: Action) {
        let name = action.name();
        let published_action = action.clone();

        let (next, command) = reduce(std::mem::take(&mut self.state), action);
        self.state = next;
        self.revision += 1;

        tracing::debug!(
            action = name,
            revision = self.revision,
            phase = self.state.items.phase(),
            command = command.map(|c| c.name()),
            "Dispatched"
        );

        self.bus.publish(StateChange {
            revision: self.revision,
            action: published_action,
            state: self.state.clone(),
        });

        if let Some(command) = command {
            self.runner.run(command, self.handle());
        }
    }

    /// Wait for the next queued action and dispatch it
    pub async fn process_next(&mut self) {
        if let Some(action) = self.inbox_rx.recv().await {
            self.dispatch(action);
        }
    }

    /// Dispatch everything already queued, without waiting. Returns how many.
    pub fn drain_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(action) = self.inbox_rx.try_recv() {
            self.dispatch(action);
            count += 1;
        }
        count
    }

    /// Dispatch queued actions until no effect is in flight and the inbox is empty
    ///
    /// An effect that dies without delivering still leaves the in-flight
    /// count, so this returns even if a source panics.
    pub async fn settle(&mut self) {
        loop {
            self.drain_pending();
            // An effect enqueues its action before leaving the in-flight count,
            // so once the count reads zero one more drain sees everything.
            if self.runner.in_flight() == 0 {
                if self.drain_pending() == 0 {
                    return;
                }
                continue;
            }

            let next = tokio::select! {
                action = self.inbox_rx.recv() => action,
                _ = self.runner.effect_finished() => None,
            };
            if let Some(action) = next {
                self.dispatch(action);
            }
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("runner", &self.runner)
            .finish_non_exhaustive()
    }
}
