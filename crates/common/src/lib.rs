//! Shared types and utilities for filekeeper.
//!
//! This crate provides common functionality used across all filekeeper
//! crates:
//! - Path normalization and name helpers
//! - The `Reporter` sink for non-fatal diagnostics
//! - Shared constants

pub mod constants;
pub mod path_utils;
pub mod report;

pub use constants::{
    ALLOWED_EXTENSIONS_RESOURCE, DEFAULT_SIZE_LIMIT, FORBIDDEN_EXTENSIONS_RESOURCE,
    MAX_SIZE_LIMIT,
};
pub use path_utils::{
    base_name, file_extension, is_within_root, lexical_normalize, normalize_path,
    normalize_paths,
};
pub use report::{report_fn, FnReporter, LogReporter, NoopReporter, Reporter, Severity};
