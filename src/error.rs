//! Error types
//!
//! Storage errors never reach the user: [`crate::persistence::Persistence`]
//! logs them and falls back to empty collections. Import errors are the only
//! ones the UI reports.

use thiserror::Error;

/// Failure talking to the key-value backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No storage in this environment (private mode, no window, disabled)
    #[error("storage unavailable")]
    Unavailable,
    /// The backend rejected the operation (quota exceeded, security error)
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Failure importing a state file
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Valid JSON, but not an `{opened, order, retired}` object
    #[error("not a grid state: {0}")]
    Shape(serde_json::Error),
    /// The file could not be read as text
    #[error("read failed: {0}")]
    Read(String),
}

impl ImportError {
    /// Text for the blocking alert shown to the user
    pub fn alert_message(&self) -> &'static str {
        match self {
            ImportError::Json(_) => "Import failed: invalid JSON.",
            ImportError::Shape(_) => "Import failed: file is not a saved grid state.",
            ImportError::Read(_) => "Import failed: could not read file.",
        }
    }
}

/// Failure reading the embedded champion data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("champion data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("champion data element #{0} not found")]
    Missing(String),
}
