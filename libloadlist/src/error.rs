//! Error types for loadlist

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadListError>;

#[derive(Error, Debug)]
pub enum LoadListError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("List operation failed: {0}")]
    ListOps(#[from] ListOpsError),

    #[error("Store is closed; action was not delivered")]
    StoreClosed,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LoadListError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadListError::InvalidInput(_) => 3,
            LoadListError::Config(_) => 1,
            LoadListError::ListOps(_) => 1,
            LoadListError::StoreClosed => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Caller contract violations in [`crate::list_ops`].
///
/// Indices handed to list operations come from the rendered list itself, so
/// hitting one of these means the caller and the list disagree about its shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListOpsError {
    #[error("Index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
