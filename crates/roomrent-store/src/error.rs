//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  std::io::Error / serde_json::Error / tempfile::PersistError            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds the path and what was being done      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  anyhow::Error (desk CLI) ← printed to the operator                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use roomrent_core::CoreError;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A filesystem call failed.
    ///
    /// ## When This Occurs
    /// - Data or photo directory can't be created
    /// - Customer file can't be read
    /// - Photo source can't be copied
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The customer file exists but isn't a JSON list of customers.
    #[error("customer file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding customers for writing failed.
    #[error("failed to encode customers: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The temp file was written but could not be moved into place.
    #[error("failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF writer could not build the document.
    #[error("failed to build PDF invoice: {0}")]
    Pdf(String),

    /// Rejected by [`crate::RejectExisting`].
    #[error("bill number {bill_number} is already used by {}", path.display())]
    BillNumberTaken { bill_number: String, path: PathBuf },

    /// Domain validation failed before anything was written.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<roomrent_core::ValidationError> for StoreError {
    fn from(err: roomrent_core::ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
