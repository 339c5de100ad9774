//! Scan records and the shapes enrichment operates over.

use std::path::Path;

use serde::{Deserialize, Serialize};

use filekeeper_common::normalize_path;

/// One filesystem node observed during a scan.
///
/// Only `path` is always present. The optional fields are filled in by the
/// passes in [`crate::enrich`]; `size` and `extension` stay unset on
/// directory entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Normalized path: forward slashes, no repeated separators.
    pub path: String,
    /// Basename of the path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lower-cased extension without the leading dot. Files only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Size in bytes. Files only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Modification time in microseconds since the Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_us: Option<i64>,
}

impl Entry {
    /// Create a bare entry, normalizing the path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            name: None,
            extension: None,
            size: None,
            modified_us: None,
        }
    }

    /// Whether the path currently resolves to a directory.
    pub fn is_dir(&self) -> bool {
        Path::new(&self.path).is_dir()
    }
}

/// Ordered sequence of entries produced by one scan invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Entries in traversal order, or in policy order after reordering.
    pub entries: Vec<Entry>,
}

impl ScanResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a result from bare paths, normalizing each.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { entries: paths.into_iter().map(Entry::new).collect() }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the result holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// The entry paths in order. Convenient for assertions and display.
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.path.as_str()).collect()
    }
}

impl IntoIterator for ScanResult {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A single record or a whole scan result.
///
/// Callers state the shape up front instead of passing a value whose shape
/// the callee has to sniff. Enrichment and ordering accept either variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entries {
    /// One record.
    Single(Entry),
    /// A whole scan result.
    Many(ScanResult),
}

impl Entries {
    /// Wrap a single bare path.
    pub fn single(path: impl Into<String>) -> Self {
        Entries::Single(Entry::new(path))
    }

    /// Apply a transformation to every contained entry, keeping the shape.
    pub fn map_entries<F>(self, mut transform: F) -> Self
    where
        F: FnMut(Entry) -> Entry,
    {
        match self {
            Entries::Single(entry) => Entries::Single(transform(entry)),
            Entries::Many(result) => Entries::Many(ScanResult {
                entries: result.entries.into_iter().map(transform).collect(),
            }),
        }
    }

    /// Flatten into a plain entry list, whatever the shape.
    pub fn into_vec(self) -> Vec<Entry> {
        match self {
            Entries::Single(entry) => vec![entry],
            Entries::Many(result) => result.entries,
        }
    }
}

impl From<Entry> for Entries {
    fn from(entry: Entry) -> Self {
        Entries::Single(entry)
    }
}

impl From<ScanResult> for Entries {
    fn from(result: ScanResult) -> Self {
        Entries::Many(result)
    }
}
