//! Upload validation and placement for filekeeper.
//!
//! This crate provides the upload half of filekeeper:
//! - `ExtensionSource` / `ExtensionSet` - allow and deny lists built from
//!   literals or nested JSON resources
//! - `SizeLimit` - human-readable size limit parsing
//! - `UploadPipeline` - per-item batch validation and directory-preserving
//!   placement

pub mod error;
pub mod extensions;
pub mod size_limit;
pub mod types;
pub mod upload;

pub use error::{RejectionReason, UploadError};
pub use extensions::{ExtensionSet, ExtensionSource};
pub use size_limit::{SizeLimit, SIZE_UNITS};
pub use types::{PendingUpload, UploadOutcome};
pub use upload::{BatchOptions, UploadPipeline};
