//! Permanent tree removal with per-item outcomes.

use std::fs;
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use filekeeper_common::{normalize_path, Reporter};

use crate::error::FileSystemError;

/// Result of removing one item during a tree sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalOutcome {
    /// Normalized path of the item.
    pub path: String,
    /// Whether the item was removed.
    pub removed: bool,
    /// Failure detail when `removed` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Permanently delete a directory tree, item by item.
///
/// The walk is bottom-up (children before their directory) so directories
/// are empty by the time they are reached; the root itself is the last item.
/// Symlinks are not followed and are removed as links. A failed removal is
/// recorded in its outcome and reported as a warning, and the sweep
/// continues past it, which leaves the item's ancestors unremovable as well.
///
/// # Errors
/// `DirectoryUnreadable` when `path` is not a directory at all.
pub fn remove_tree(
    path: &str,
    reporter: &dyn Reporter,
) -> Result<Vec<RemovalOutcome>, FileSystemError> {
    let root: String = normalize_path(path);
    if !Path::new(&root).is_dir() {
        return Err(FileSystemError::DirectoryUnreadable {
            path: root,
            message: "not a directory".to_string(),
        });
    }

    let mut outcomes: Vec<RemovalOutcome> = Vec::new();
    for item in WalkDir::new(&root).follow_links(false).contents_first(true) {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                let failed: String = err
                    .path()
                    .map(|p| normalize_path(&p.to_string_lossy()))
                    .unwrap_or_else(|| root.clone());
                reporter.warning(&format!("Cannot visit {failed}: {err}"));
                outcomes.push(RemovalOutcome {
                    path: failed,
                    removed: false,
                    message: Some(err.to_string()),
                });
                continue;
            }
        };

        let target: String = normalize_path(&item.path().to_string_lossy());
        let removal = if item.file_type().is_dir() {
            fs::remove_dir(item.path())
        } else {
            fs::remove_file(item.path())
        };
        match removal {
            Ok(()) => outcomes.push(RemovalOutcome { path: target, removed: true, message: None }),
            Err(err) => {
                reporter.warning(&format!("Failed to remove {target}: {err}"));
                outcomes.push(RemovalOutcome {
                    path: target,
                    removed: false,
                    message: Some(err.to_string()),
                });
            }
        }
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filekeeper_common::NoopReporter;
    use tempfile::TempDir;

    fn create_removable_tree() -> (TempDir, String) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("doomed");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("top.txt"), b"t").unwrap();
        fs::create_dir(root.join("inner")).unwrap();
        fs::write(root.join("inner/leaf.txt"), b"l").unwrap();
        (temp, root.to_string_lossy().into_owned())
    }

    #[test]
    fn test_remove_tree_deletes_everything() {
        let (_temp, root) = create_removable_tree();
        let outcomes = remove_tree(&root, &NoopReporter).unwrap();

        assert!(!Path::new(&root).exists());
        assert_eq!(outcomes.len(), 4);
        assert!(outcomes.iter().all(|outcome| outcome.removed));
    }

    #[test]
    fn test_root_is_last_outcome() {
        let (_temp, root) = create_removable_tree();
        let outcomes = remove_tree(&root, &NoopReporter).unwrap();
        assert_eq!(outcomes.last().unwrap().path, normalize_path(&root));
    }

    #[test]
    fn test_children_precede_their_directory() {
        let (_temp, root) = create_removable_tree();
        let outcomes = remove_tree(&root, &NoopReporter).unwrap();

        let position = |suffix: &str| {
            outcomes
                .iter()
                .position(|outcome| outcome.path.ends_with(suffix))
                .unwrap()
        };
        assert!(position("inner/leaf.txt") < position("/inner"));
    }

    #[test]
    fn test_missing_root_fails() {
        let err = remove_tree("/no/such/tree", &NoopReporter).unwrap_err();
        assert!(matches!(err, FileSystemError::DirectoryUnreadable { .. }));
    }

    #[test]
    fn test_file_root_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("single.txt");
        fs::write(&file, b"x").unwrap();
        let err = remove_tree(&file.to_string_lossy(), &NoopReporter).unwrap_err();
        assert!(matches!(err, FileSystemError::DirectoryUnreadable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_removed_not_followed() {
        let (_temp, root) = create_removable_tree();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("keep.txt"), b"k").unwrap();
        std::os::unix::fs::symlink(outside.path(), Path::new(&root).join("link")).unwrap();

        let outcomes = remove_tree(&root, &NoopReporter).unwrap();

        assert!(outcomes.iter().all(|outcome| outcome.removed));
        assert!(outside.path().join("keep.txt").exists());
        assert!(!Path::new(&root).exists());
    }
}
