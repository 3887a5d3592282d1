//! Pure reducer function for state transitions
//!
//! `(State, Action) -> (State, Option<Command>)`
//!
//! The reducer computes the next state and says which effect, if any, should
//! run next. It never performs the effect itself.

use super::actions::{Action, FetchResult};
use super::command::{Command, LoadGeneration};
use super::state::AppState;
use crate::error::ListOpsError;
use crate::list_ops::{self, IndexSet};
use crate::loadable::Loadable;
use crate::types::Item;

/// Pure reducer function
///
/// Total over [`Action`]; no I/O. Row gestures only apply to a `Loaded`
/// list and are dropped (not queued) in every other phase.
///
/// `RepositoryLoad` is accepted from any phase: it enters `Loading`
/// (carrying any current value), bumps the load generation and asks for a
/// fetch. A completion is only applied if it answers the latest load.
pub fn reduce(state: AppState, action: Action) -> (AppState, Option<Command>) {
    match action {
        // === Row gestures ===
        Action::RowMove {
            source,
            destination,
        } => {
            let next = apply_to_loaded(state, "row_move", &source, |items| {
                list_ops::move_rows(items, &source, destination)
            });
            (next, None)
        }

        Action::RowDelete { source } => {
            let next = apply_to_loaded(state, "row_delete", &source, |items| {
                list_ops::delete_rows(items, &source)
            });
            (next, None)
        }

        // === Repository ===
        Action::RepositoryLoad => {
            let generation = state.latest_load.next();
            let next = AppState {
                items: state.items.refreshing(),
                latest_load: generation,
            };
            (next, Some(Command::FetchItems { generation }))
        }

        Action::RepositoryLoadingComplete { generation, result } => {
            (complete_load(state, generation, result), None)
        }
    }
}

/// Run a list operation against a loaded list
///
/// Any other phase is a no-op. An out-of-range index means the caller and
/// the list disagree about its shape; that is logged and the state is kept.
fn apply_to_loaded<F>(state: AppState, action: &str, indices: &IndexSet, op: F) -> AppState
where
    F: FnOnce(&[Item]) -> Result<Vec<Item>, ListOpsError>,
{
    let Loadable::Loaded(items) = &state.items else {
        tracing::debug!(
            action,
            phase = state.items.phase(),
            "Ignoring row gesture; list is not loaded"
        );
        return state;
    };

    match op(items.as_slice()) {
        Ok(updated) => AppState {
            items: Loadable::Loaded(updated),
            ..state
        },
        Err(e) => {
            tracing::error!(action, ?indices, len = items.len(), "Rejected row gesture: {}", e);
            state
        }
    }
}

fn complete_load(state: AppState, generation: LoadGeneration, result: FetchResult) -> AppState {
    if generation != state.latest_load {
        tracing::warn!(
            %generation,
            latest = %state.latest_load,
            "Discarding stale load completion"
        );
        return state;
    }

    AppState {
        items: Loadable::from(result),
        ..state
    }
}
