//! Filesystem indexing for filekeeper.
//!
//! This crate provides directory scanning and scan-result shaping:
//! - `DirectoryScanner` - flat and recursive scans with normalized paths
//! - `ScanFilter` - include/exclude glob filtering
//! - `enrich` - size, extension, name, and mtime annotation passes
//! - `order` - reordering policies for scan results
//! - `remove_tree` / `read_lines` - removal sweeps and text retrieval

pub mod content;
pub mod enrich;
pub mod entry;
pub mod error;
pub mod filter;
pub mod order;
pub mod remove;
pub mod scanner;

pub use content::read_lines;
pub use enrich::{annotate_extension, annotate_modified, annotate_name, annotate_size};
pub use entry::{Entries, Entry, ScanResult};
pub use error::FileSystemError;
pub use filter::ScanFilter;
pub use order::{reorder, reorder_entries, OrderPolicy, SortOrder};
pub use remove::{remove_tree, RemovalOutcome};
pub use scanner::DirectoryScanner;
