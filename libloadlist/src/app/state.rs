//! Application state
//!
//! Immutable state structure. All state transitions happen through the
//! reducer (see `reducer.rs`); the store replaces its state wholesale with
//! whatever the reducer returns.

use serde::Serialize;

use super::command::LoadGeneration;
use crate::loadable::Loadable;
use crate::types::Item;

/// Root application state
///
/// This is the single source of truth for the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppState {
    /// The item list and where its load stands
    pub items: Loadable<Vec<Item>>,

    /// Generation of the most recently issued load
    pub latest_load: LoadGeneration,
}

impl AppState {
    /// Create new application state with nothing requested yet
    pub fn new() -> Self {
        Self::default()
    }

    /// State with an already materialized list, as if a load had succeeded
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Loadable::Loaded(items),
            ..Self::default()
        }
    }

    /// Names of the currently carried items, in order
    pub fn item_names(&self) -> Vec<&str> {
        self.items
            .value()
            .map(|items| items.iter().map(|item| item.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// What the presentation layer should show for this state
    pub fn view(&self) -> ItemsView<'_> {
        match &self.items {
            Loadable::NotRequested | Loadable::Loading { last: None } => ItemsView::Spinner,
            Loadable::Loading { last: Some(items) } => ItemsView::List {
                items,
                refreshing: true,
            },
            Loadable::Loaded(items) => ItemsView::List {
                items,
                refreshing: false,
            },
            Loadable::Failed(error) => ItemsView::Error(&error.description),
        }
    }
}

/// Presentation projection of [`AppState`]
///
/// `Spinner` covers both "not requested" and "loading with nothing cached";
/// a renderer showing it is expected to dispatch `RepositoryLoad` when the
/// state is `NotRequested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemsView<'a> {
    Spinner,
    List { items: &'a [Item], refreshing: bool },
    Error(&'a str),
}
