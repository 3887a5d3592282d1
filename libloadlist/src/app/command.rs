//! Side-effect commands returned by the reducer
//!
//! The reducer never performs I/O. When a transition needs work done in the
//! outside world it returns a `Command`, and the effect runner executes it.

use serde::Serialize;
use std::fmt;

/// Identifies one `RepositoryLoad` and the completion that answers it
///
/// Generations increase monotonically per store. A completion whose
/// generation is not the latest one issued is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct LoadGeneration(pub u64);

impl LoadGeneration {
    pub fn next(self) -> Self {
        LoadGeneration(self.0 + 1)
    }
}

impl fmt::Display for LoadGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pending impure work requested by the reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fetch the item list; settles as `RepositoryLoadingComplete`
    FetchItems { generation: LoadGeneration },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::FetchItems { .. } => "fetch_items",
        }
    }
}
