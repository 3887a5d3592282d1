//! Application module
//!
//! Contains the core application architecture:
//! - Actions: What can happen
//! - State: What is true right now
//! - Commands: What impure work should happen next
//! - Reducer: Pure function (State, Action) -> (State, Option<Command>)

pub mod actions;
pub mod command;
pub mod reducer;
pub mod state;

// Re-export commonly used types
pub use actions::{Action, FetchResult};
pub use command::{Command, LoadGeneration};
pub use reducer::reduce;
pub use state::{AppState, ItemsView};
