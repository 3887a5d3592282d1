//! Lifecycle of an asynchronously obtained value

use serde::Serialize;

use crate::types::ErrorInfo;

/// Where an asynchronously loaded value currently stands
///
/// Transitions never mutate a `Loadable`; a new one is constructed instead.
/// Entering `Loading` carries the last successful value forward so a refresh
/// can keep showing stale data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "data", rename_all = "snake_case")]
pub enum Loadable<T> {
    /// No load has been initiated
    NotRequested,

    /// A load is in flight
    Loading {
        /// Value of the previous successful load, if any
        last: Option<T>,
    },

    /// The most recent load succeeded
    Loaded(T),

    /// The most recent load failed
    Failed(ErrorInfo),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::NotRequested
    }
}

impl<T> Loadable<T> {
    /// The carried value: `last` while loading, the value once loaded
    pub fn value(&self) -> Option<&T> {
        match self {
            Loadable::Loading { last } => last.as_ref(),
            Loadable::Loaded(value) => Some(value),
            Loadable::NotRequested | Loadable::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Loadable::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Loadable::Loaded(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading { .. })
    }

    /// Short phase name for logs
    pub fn phase(&self) -> &'static str {
        match self {
            Loadable::NotRequested => "not_requested",
            Loadable::Loading { .. } => "loading",
            Loadable::Loaded(_) => "loaded",
            Loadable::Failed(_) => "failed",
        }
    }
}

impl<T: Clone> Loadable<T> {
    /// Enter `Loading`, keeping whatever value is currently carried
    pub fn refreshing(&self) -> Self {
        Loadable::Loading {
            last: self.value().cloned(),
        }
    }
}

impl<T> From<Result<T, ErrorInfo>> for Loadable<T> {
    fn from(result: Result<T, ErrorInfo>) -> Self {
        match result {
            Ok(value) => Loadable::Loaded(value),
            Err(error) => Loadable::Failed(error),
        }
    }
}
