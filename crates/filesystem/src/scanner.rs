//! Directory scanning with normalized paths.
//!
//! The scanner lists directories the way the underlying stream returns them
//! (no implied ordering; see [`crate::order`] for reordering) and records
//! every path in forward-slash form. Recursive scans are depth-first
//! pre-order: each directory entry is immediately followed by its own
//! subtree, so a subtree occupies one contiguous run of the result.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use filekeeper_common::{normalize_path, Reporter};

use crate::entry::{Entry, ScanResult};
use crate::error::FileSystemError;
use crate::filter::ScanFilter;

/// Recursive directory scanner.
///
/// Holds a configured root (validated to be a listable directory when set),
/// an optional glob filter, and a copy of the most recent result for callers
/// that post-process "whatever was scanned last".
#[derive(Debug, Default)]
pub struct DirectoryScanner {
    root: Option<String>,
    filter: ScanFilter,
    last_scan: Option<ScanResult>,
}

impl DirectoryScanner {
    /// Create a scanner with no configured root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner rooted at `path`.
    ///
    /// # Errors
    /// `DirectoryUnreadable` when `path` cannot be opened as a directory.
    pub fn with_root(path: &str) -> Result<Self, FileSystemError> {
        let mut scanner = Self::new();
        scanner.set_root(path)?;
        Ok(scanner)
    }

    /// Replace the scan filter.
    pub fn with_filter(mut self, filter: ScanFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the root directory, normalizing the path and probing readability.
    ///
    /// # Errors
    /// `DirectoryUnreadable` when `path` cannot be opened as a directory.
    pub fn set_root(&mut self, path: &str) -> Result<(), FileSystemError> {
        let normalized: String = normalize_path(path);
        probe_directory(&normalized)?;
        self.root = Some(normalized);
        Ok(())
    }

    /// The configured root, if any.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// The result of the most recent scan, if any.
    pub fn last_scan(&self) -> Option<&ScanResult> {
        self.last_scan.as_ref()
    }

    /// List the immediate children of the configured root.
    ///
    /// # Errors
    /// `PathNotConfigured` without a root, `DirectoryUnreadable` when the
    /// root can no longer be opened.
    pub fn scan(&mut self, reporter: &dyn Reporter) -> Result<ScanResult, FileSystemError> {
        let root: String = self.configured_root()?;
        self.scan_dir(&root, reporter)
    }

    /// List the immediate children of an explicit directory.
    ///
    /// Children come back in directory-stream order, each joined to the
    /// parent and normalized. Entries the stream fails to yield are skipped
    /// with a warning.
    ///
    /// # Errors
    /// `DirectoryUnreadable` when `path` cannot be opened.
    pub fn scan_dir(
        &mut self,
        path: &str,
        reporter: &dyn Reporter,
    ) -> Result<ScanResult, FileSystemError> {
        let base: String = normalize_path(path);
        let mut result = ScanResult::new();
        for child in read_children(&base, reporter)? {
            let joined: String = join_normalized(&base, &child);
            if self.admits(&base, &joined) {
                result.entries.push(Entry::new(joined));
            }
        }
        self.last_scan = Some(result.clone());
        Ok(result)
    }

    /// Recursively scan the configured root, depth-first pre-order.
    ///
    /// # Errors
    /// `PathNotConfigured` without a root, `DirectoryUnreadable` when any
    /// directory in the tree cannot be opened.
    pub fn recursive_scan(
        &mut self,
        reporter: &dyn Reporter,
    ) -> Result<ScanResult, FileSystemError> {
        let root: String = self.configured_root()?;
        self.recursive_scan_dir(&root, reporter)
    }

    /// Recursively scan an explicit directory, depth-first pre-order.
    ///
    /// Each directory entry is immediately followed by its own recursive
    /// listing. Every physical directory is descended into at most once per
    /// call: when a directory's canonical path was already visited (a
    /// symlink cycle, or two links to the same tree) the entry stays in the
    /// result but the repeated subtree is truncated with a warning. This
    /// keeps traversals of cyclic link structures finite.
    ///
    /// # Errors
    /// `DirectoryUnreadable` when any directory in the tree cannot be
    /// opened.
    pub fn recursive_scan_dir(
        &mut self,
        path: &str,
        reporter: &dyn Reporter,
    ) -> Result<ScanResult, FileSystemError> {
        let base: String = normalize_path(path);
        let mut visited: HashSet<PathBuf> = HashSet::new();
        if let Ok(resolved) = fs::canonicalize(&base) {
            visited.insert(resolved);
        }

        let mut entries: Vec<Entry> = Vec::new();
        self.walk(&base, &base, &mut visited, &mut entries, reporter)?;

        let result = ScanResult { entries };
        self.last_scan = Some(result.clone());
        Ok(result)
    }

    fn walk(
        &self,
        base: &str,
        dir: &str,
        visited: &mut HashSet<PathBuf>,
        out: &mut Vec<Entry>,
        reporter: &dyn Reporter,
    ) -> Result<(), FileSystemError> {
        for child in read_children(dir, reporter)? {
            let joined: String = join_normalized(dir, &child);
            let is_dir: bool = Path::new(&joined).is_dir();
            if self.admits(base, &joined) {
                out.push(Entry::new(joined.clone()));
            }
            if is_dir && self.may_descend(&joined, visited, reporter) {
                self.walk(base, &joined, visited, out, reporter)?;
            }
        }
        Ok(())
    }

    /// Record a directory as visited; false truncates the descent.
    fn may_descend(
        &self,
        path: &str,
        visited: &mut HashSet<PathBuf>,
        reporter: &dyn Reporter,
    ) -> bool {
        match fs::canonicalize(path) {
            Ok(resolved) => {
                if visited.insert(resolved) {
                    true
                } else {
                    reporter.warning(&format!(
                        "Directory {path} was already scanned in this traversal, truncating"
                    ));
                    false
                }
            }
            Err(err) => {
                reporter.warning(&format!("Cannot resolve {path}: {err}"));
                false
            }
        }
    }

    /// Whether a scanned path passes the configured filter.
    fn admits(&self, base: &str, path: &str) -> bool {
        if self.filter.is_empty() {
            return true;
        }
        self.filter.matches(relative_to(base, path))
    }

    fn configured_root(&self) -> Result<String, FileSystemError> {
        self.root.clone().ok_or(FileSystemError::PathNotConfigured)
    }
}

/// Immediate child names of a directory, in stream order.
///
/// `fs::read_dir` never yields `.` or `..`. A child the stream fails to
/// yield is skipped with a warning rather than failing the listing.
fn read_children(path: &str, reporter: &dyn Reporter) -> Result<Vec<String>, FileSystemError> {
    let stream = fs::read_dir(path).map_err(|err| FileSystemError::DirectoryUnreadable {
        path: path.to_string(),
        message: err.to_string(),
    })?;

    let mut children: Vec<String> = Vec::new();
    for child in stream {
        match child {
            Ok(child) => children.push(child.file_name().to_string_lossy().into_owned()),
            Err(err) => {
                reporter.warning(&format!("Skipping unreadable entry under {path}: {err}"));
            }
        }
    }
    Ok(children)
}

fn join_normalized(parent: &str, child: &str) -> String {
    normalize_path(&format!("{parent}/{child}"))
}

/// Portion of `path` below `base`, for filter matching.
fn relative_to<'a>(base: &str, path: &'a str) -> &'a str {
    path.strip_prefix(base)
        .map(|rest| rest.trim_start_matches('/'))
        .unwrap_or(path)
}

fn probe_directory(path: &str) -> Result<(), FileSystemError> {
    fs::read_dir(path)
        .map(|_| ())
        .map_err(|err| FileSystemError::DirectoryUnreadable {
            path: path.to_string(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use filekeeper_common::{report_fn, NoopReporter, Severity};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Root with a.txt, sub/b.txt, and sub/deep/c.txt.
    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), b"alpha").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/b.txt"), b"beta").unwrap();
        fs::create_dir(temp.path().join("sub/deep")).unwrap();
        fs::write(temp.path().join("sub/deep/c.txt"), b"gamma").unwrap();
        temp
    }

    fn root_string(temp: &TempDir) -> String {
        normalize_path(&temp.path().to_string_lossy())
    }

    #[test]
    fn test_scan_lists_immediate_children() {
        let temp = create_test_tree();
        let root = root_string(&temp);
        let mut scanner = DirectoryScanner::with_root(&root).unwrap();

        let result = scanner.scan(&NoopReporter).unwrap();
        let mut paths = result.paths();
        paths.sort();

        assert_eq!(paths, vec![format!("{root}/a.txt"), format!("{root}/sub")]);
    }

    #[test]
    fn test_scan_without_root_fails() {
        let mut scanner = DirectoryScanner::new();
        assert_eq!(
            scanner.scan(&NoopReporter).unwrap_err(),
            FileSystemError::PathNotConfigured
        );
        assert_eq!(
            scanner.recursive_scan(&NoopReporter).unwrap_err(),
            FileSystemError::PathNotConfigured
        );
    }

    #[test]
    fn test_set_root_rejects_missing_directory() {
        let mut scanner = DirectoryScanner::new();
        let err = scanner.set_root("/no/such/directory").unwrap_err();
        assert!(matches!(err, FileSystemError::DirectoryUnreadable { .. }));
        assert_eq!(scanner.root(), None);
    }

    #[test]
    fn test_set_root_rejects_file() {
        let temp = create_test_tree();
        let file = format!("{}/a.txt", root_string(&temp));
        let mut scanner = DirectoryScanner::new();
        assert!(matches!(
            scanner.set_root(&file),
            Err(FileSystemError::DirectoryUnreadable { .. })
        ));
    }

    #[test]
    fn test_set_root_normalizes() {
        let temp = create_test_tree();
        let messy = format!("{}//", temp.path().to_string_lossy());
        let mut scanner = DirectoryScanner::new();
        scanner.set_root(&messy).unwrap();
        let root = scanner.root().unwrap().to_string();
        assert!(!root.contains("//"));
    }

    #[test]
    fn test_recursive_scan_is_preorder_contiguous() {
        let temp = create_test_tree();
        let root = root_string(&temp);
        let mut scanner = DirectoryScanner::with_root(&root).unwrap();

        let result = scanner.recursive_scan(&NoopReporter).unwrap();
        let paths: Vec<String> = result.iter().map(|entry| entry.path.clone()).collect();
        assert_eq!(paths.len(), 5);

        let sub = format!("{root}/sub");
        let sub_index = paths.iter().position(|path| *path == sub).unwrap();
        for path in &paths[sub_index + 1..sub_index + 4] {
            assert!(path.starts_with(&format!("{sub}/")), "{path} outside the sub block");
        }

        let deep = format!("{sub}/deep");
        let deep_index = paths.iter().position(|path| *path == deep).unwrap();
        assert_eq!(paths[deep_index + 1], format!("{deep}/c.txt"));
    }

    #[test]
    fn test_recursive_scan_missing_directory_fails() {
        let mut scanner = DirectoryScanner::new();
        let err = scanner
            .recursive_scan_dir("/no/such/tree", &NoopReporter)
            .unwrap_err();
        assert!(matches!(err, FileSystemError::DirectoryUnreadable { .. }));
    }

    #[test]
    fn test_filtered_directory_is_omitted_but_descended() {
        let temp = create_test_tree();
        let root = root_string(&temp);
        let filter = ScanFilter::exclude(vec!["sub".to_string()]).unwrap();
        let mut scanner = DirectoryScanner::with_root(&root).unwrap().with_filter(filter);

        let result = scanner.recursive_scan(&NoopReporter).unwrap();
        let paths = result.paths();

        assert!(!paths.contains(&format!("{root}/sub").as_str()));
        assert!(paths.contains(&format!("{root}/sub/b.txt").as_str()));
        assert!(paths.contains(&format!("{root}/sub/deep/c.txt").as_str()));
    }

    #[test]
    fn test_include_filter_limits_result() {
        let temp = create_test_tree();
        let root = root_string(&temp);
        let filter = ScanFilter::include(vec!["**/*.txt".to_string()]).unwrap();
        let mut scanner = DirectoryScanner::with_root(&root).unwrap().with_filter(filter);

        let result = scanner.recursive_scan(&NoopReporter).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|entry| entry.path.ends_with(".txt")));
    }

    #[test]
    fn test_last_scan_is_cached() {
        let temp = create_test_tree();
        let root = root_string(&temp);
        let mut scanner = DirectoryScanner::with_root(&root).unwrap();
        assert!(scanner.last_scan().is_none());

        let flat = scanner.scan(&NoopReporter).unwrap();
        assert_eq!(scanner.last_scan(), Some(&flat));

        let recursive = scanner.recursive_scan(&NoopReporter).unwrap();
        assert_eq!(scanner.last_scan(), Some(&recursive));
        assert_ne!(flat, recursive);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_truncated() {
        let temp = create_test_tree();
        let root = root_string(&temp);
        std::os::unix::fs::symlink(temp.path(), temp.path().join("sub/loop")).unwrap();

        let warnings: Mutex<Vec<String>> = Mutex::new(Vec::new());
        let reporter = report_fn(|severity, message| {
            if severity == Severity::Warning {
                warnings.lock().unwrap().push(message.to_string());
            }
        });

        let mut scanner = DirectoryScanner::with_root(&root).unwrap();
        let result = scanner.recursive_scan(&reporter).unwrap();

        let loop_path = format!("{root}/sub/loop");
        assert!(result.paths().contains(&loop_path.as_str()));
        assert_eq!(result.len(), 6);

        let captured = warnings.lock().unwrap();
        assert!(captured.iter().any(|message| message.contains("loop")));
    }

    #[cfg(unix)]
    #[test]
    fn test_duplicate_link_target_scanned_once() {
        let temp = create_test_tree();
        let root = root_string(&temp);
        std::os::unix::fs::symlink(temp.path().join("sub/deep"), temp.path().join("again"))
            .unwrap();

        let mut scanner = DirectoryScanner::with_root(&root).unwrap();
        let result = scanner.recursive_scan(&NoopReporter).unwrap();

        let c_count = result
            .iter()
            .filter(|entry| entry.path.ends_with("/c.txt"))
            .count();
        assert_eq!(c_count, 1);
    }
}
