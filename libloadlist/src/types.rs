//! Core types for loadlist

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Names of the fixed collection produced by the item repository
pub const CANONICAL_NAMES: [&str; 5] = ["Foo", "Bar", "Baz", "Bing", "Bang"];

/// An identified list entry
///
/// `id` is stable for the lifetime of the item and is what list diffing keys
/// on. `PartialEq` compares both `id` and `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
}

impl Item {
    /// Create an item with a freshly generated identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// The canonical five items, each with a fresh identifier
    pub fn canonical() -> Vec<Item> {
        CANONICAL_NAMES.iter().map(|name| Item::new(*name)).collect()
    }
}

/// Description of a failed load
///
/// Only used for display and for equality. Two `ErrorInfo` values are equal
/// when their descriptions are equal; the `cause` is ignored. This is a lossy
/// comparison: distinct failures that happen to render the same text compare
/// equal.
#[derive(Clone, Serialize)]
pub struct ErrorInfo {
    pub description: String,
    #[serde(skip)]
    pub cause: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl ErrorInfo {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            cause: None,
        }
    }

    /// Wrap an underlying error, using its `Display` output as the description
    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            description: error.to_string(),
            cause: Some(Arc::new(error)),
        }
    }
}

impl PartialEq for ErrorInfo {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
    }
}

impl Eq for ErrorInfo {}

impl fmt::Debug for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorInfo")
            .field("description", &self.description)
            .field("cause", &self.cause.as_ref().map(|c| c.to_string()))
            .finish()
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_items_have_distinct_ids() {
        let items = Item::canonical();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, CANONICAL_NAMES);

        let ids: std::collections::HashSet<Uuid> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_canonical_ids_are_fresh_per_call() {
        let first = Item::canonical();
        let second = Item::canonical();
        assert_ne!(first[0].id, second[0].id);
        assert_ne!(first, second);
    }

    #[test]
    fn test_item_equality_compares_id_and_name() {
        let item = Item::new("Foo");
        let renamed = Item {
            name: "Bar".to_string(),
            ..item.clone()
        };
        assert_eq!(item, item.clone());
        assert_ne!(item, renamed);
    }

    #[test]
    fn test_error_info_equality_ignores_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let with_cause = ErrorInfo::from_error(io);
        let without_cause = ErrorInfo::new("disk on fire");

        assert!(with_cause.cause.is_some());
        assert_eq!(with_cause, without_cause);
        assert_ne!(with_cause, ErrorInfo::new("network down"));
    }

    #[test]
    fn test_error_info_serializes_description_only() {
        let json = serde_json::to_string(&ErrorInfo::new("timeout")).unwrap();
        assert_eq!(json, r#"{"description":"timeout"}"#);
    }
}
