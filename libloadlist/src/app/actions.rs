//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. This module defines
//! every event the store accepts, whether it comes from the presentation
//! layer or back from the effect runner.

use serde::Serialize;

use crate::list_ops::IndexSet;
use crate::types::{ErrorInfo, Item};

use super::command::LoadGeneration;

/// Outcome of a fetch, as delivered back into the store
pub type FetchResult = Result<Vec<Item>, ErrorInfo>;

/// Actions that trigger state transitions
///
/// Equality on `RepositoryLoadingComplete` failures compares error
/// descriptions only (see [`ErrorInfo`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    // === Row gestures ===
    /// Rows were dragged to a new position
    RowMove {
        source: IndexSet,
        /// Offset in the list as it was before the move
        destination: usize,
    },

    /// Rows were swiped away
    RowDelete { source: IndexSet },

    // === Repository ===
    /// Start (or restart) loading the item list
    RepositoryLoad,

    /// A fetch settled
    RepositoryLoadingComplete {
        /// Which `RepositoryLoad` this completion answers
        generation: LoadGeneration,
        result: FetchResult,
    },
}

impl Action {
    /// Short action name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::RowMove { .. } => "row_move",
            Action::RowDelete { .. } => "row_delete",
            Action::RepositoryLoad => "repository_load",
            Action::RepositoryLoadingComplete { .. } => "repository_loading_complete",
        }
    }

    /// Convenience constructor for a move gesture
    pub fn row_move(source: impl IntoIterator<Item = usize>, destination: usize) -> Self {
        Action::RowMove {
            source: source.into_iter().collect(),
            destination,
        }
    }

    /// Convenience constructor for a delete gesture
    pub fn row_delete(source: impl IntoIterator<Item = usize>) -> Self {
        Action::RowDelete {
            source: source.into_iter().collect(),
        }
    }
}
