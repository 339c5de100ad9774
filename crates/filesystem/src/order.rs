//! Ordering policies for scan results.
//!
//! Reordering happens in place and applies to whole results only; a single
//! record has nothing to reorder and passes through untouched.

use std::str::FromStr;

use filekeeper_common::base_name;

use crate::entry::{Entries, Entry, ScanResult};
use crate::error::FileSystemError;

/// How a scan result should be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderPolicy {
    /// Stable case-insensitive lexicographic sort by basename.
    #[default]
    ByName,
    /// Stable partition: files first, folders appended after them.
    SeparateFoldersFromFiles,
}

impl FromStr for OrderPolicy {
    type Err = FileSystemError;

    /// Parse a policy identifier: `"OrderByName"` or `"SeparateFromFolder"`.
    ///
    /// # Errors
    /// `UnknownOrderPolicy` for anything else.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim() {
            "OrderByName" => Ok(OrderPolicy::ByName),
            "SeparateFromFolder" => Ok(OrderPolicy::SeparateFoldersFromFiles),
            other => Err(FileSystemError::UnknownOrderPolicy { name: other.to_string() }),
        }
    }
}

/// Direction applied after a policy has ordered the entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    /// Reverse of the ascending arrangement.
    Descending,
}

/// Reorder a scan result in place according to a policy.
pub fn reorder(result: &mut ScanResult, policy: OrderPolicy, direction: SortOrder) {
    match policy {
        OrderPolicy::ByName => order_by_name(result),
        OrderPolicy::SeparateFoldersFromFiles => separate_folders(result),
    }
    if direction == SortOrder::Descending {
        result.entries.reverse();
    }
}

/// Reorder either shape; a single record stays untouched.
pub fn reorder_entries(entries: &mut Entries, policy: OrderPolicy, direction: SortOrder) {
    if let Entries::Many(result) = entries {
        reorder(result, policy, direction);
    }
}

/// Stable case-insensitive ascending sort by basename.
fn order_by_name(result: &mut ScanResult) {
    result
        .entries
        .sort_by_cached_key(|entry| base_name(&entry.path).to_lowercase());
}

/// Stable partition with files before folders.
///
/// Relative order inside each group is preserved. An entry whose path no
/// longer resolves to a directory counts as a file.
fn separate_folders(result: &mut ScanResult) {
    let (folders, files): (Vec<Entry>, Vec<Entry>) =
        result.entries.drain(..).partition(Entry::is_dir);
    result.entries.extend(files);
    result.entries.extend(folders);
}
