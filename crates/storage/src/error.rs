//! Error types for upload configuration and batch execution.
//!
//! `UploadError` covers configuration and batch preconditions and fails the
//! whole call. `RejectionReason` is the per-item verdict: one rejected item
//! never aborts the rest of its batch.

use serde::Serialize;
use thiserror::Error;

/// Fatal errors raised by pipeline configuration and batch preconditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// An extension resource could not be read or decoded.
    #[error("Cannot load extension resource {path}: {message}")]
    ResourceUnreadable { path: String, message: String },

    /// An extension resource path does not name a JSON document.
    #[error("Extension resource {path} is not a .json document")]
    InvalidResourceType { path: String },

    /// No allowed-extension set has been configured.
    #[error("No allowed extensions configured")]
    PolicyNotConfigured,

    /// The destination directory is missing or cannot be opened.
    #[error("Destination {path} not usable: {message}")]
    DestinationUnreadable { path: String, message: String },

    /// The destination directory already contains entries.
    #[error("Destination {path} is not empty")]
    DestinationNotEmpty { path: String },

    /// A configured size limit exceeds the supported range.
    #[error("Size limit of {bytes} bytes is above the maximum of {max}")]
    SizeLimitOutOfRange { bytes: u64, max: u64 },
}

/// Why a single pending upload was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    /// The declared name's extension is not allowed, or is forbidden.
    #[error("Extension not allowed")]
    ExtensionRejected,

    /// The declared size exceeds the configured limit.
    #[error("Size {declared} above the limit of {limit}")]
    SizeRejected { declared: u64, limit: u64 },

    /// A filesystem failure while placing the item.
    #[error("I/O failure: {message}")]
    IoFailure { message: String },
}
