//! loadlist - a unidirectional state container for an asynchronously loaded list
//!
//! A single [`AppState`] is owned by a [`Store`]. Actions go in through
//! [`Store::dispatch`], the pure [`reduce`] function computes the next state
//! plus an optional [`Command`], and the [`EffectRunner`] executes commands
//! and dispatches their outcome back into the store.

pub mod app;
pub mod config;
pub mod effects;
pub mod error;
pub mod events;
pub mod list_ops;
pub mod loadable;
pub mod logging;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use app::{reduce, Action, AppState, Command, ItemsView, LoadGeneration};
pub use config::Config;
pub use effects::{DelayedRepository, EffectRunner, ItemSource};
pub use error::{ListOpsError, LoadListError, Result};
pub use events::{StateChange, StateReceiver};
pub use list_ops::IndexSet;
pub use loadable::Loadable;
pub use store::{Store, StoreHandle};
pub use types::{ErrorInfo, Item};
