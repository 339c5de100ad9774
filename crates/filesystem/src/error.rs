//! Error types for scanning, ordering, and content retrieval.

use thiserror::Error;

/// Errors that can occur during filesystem operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileSystemError {
    /// No scan root has been configured.
    #[error("No directory configured")]
    PathNotConfigured,

    /// A directory could not be opened for listing.
    #[error("Cannot open directory {path}: {message}")]
    DirectoryUnreadable { path: String, message: String },

    /// An ordering policy identifier was not recognized.
    #[error("Unknown order policy: {name}")]
    UnknownOrderPolicy { name: String },

    /// A scan filter pattern failed to compile.
    #[error("Invalid filter pattern '{pattern}': {reason}")]
    InvalidFilterPattern { pattern: String, reason: String },

    /// A file could not be read as text.
    #[error("File {path} not found or not readable: {message}")]
    FileUnreadable { path: String, message: String },
}
