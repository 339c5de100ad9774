//! Data structures shared by upload operations.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::RejectionReason;

/// One caller-submitted file awaiting validation and placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    /// Temporary location currently holding the bytes.
    pub source: PathBuf,
    /// Declared name; may embed `/`-separated relative directories.
    pub name: String,
    /// Declared size in bytes.
    pub size: u64,
}

impl PendingUpload {
    /// Describe a pending upload.
    pub fn new(source: impl Into<PathBuf>, name: impl Into<String>, size: u64) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
            size,
        }
    }
}

/// Verdict for one pending upload within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UploadOutcome {
    /// The item passed validation and was moved into place.
    Stored {
        /// Declared name of the item.
        name: String,
        /// Normalized final path.
        path: String,
    },
    /// The item was refused; the batch keeps going.
    Rejected {
        /// Declared name of the item.
        name: String,
        /// Why it was refused.
        reason: RejectionReason,
    },
}

impl UploadOutcome {
    /// Whether this outcome stored its item.
    pub fn is_stored(&self) -> bool {
        matches!(self, UploadOutcome::Stored { .. })
    }

    /// The declared name the outcome belongs to.
    pub fn name(&self) -> &str {
        match self {
            UploadOutcome::Stored { name, .. } => name,
            UploadOutcome::Rejected { name, .. } => name,
        }
    }
}
