//! Path normalization and name helpers.
//!
//! Scan records and upload names travel as strings in forward-slash form.
//! The helpers here are pure string/lexical operations: they never touch the
//! filesystem and never fail.

use std::path::{Component, Path, PathBuf};

/// Normalize a path string to forward-slash form.
///
/// Backslash separators become forward slashes and runs of repeated
/// separators collapse to a single one. Applying the function to its own
/// output returns the input unchanged.
///
/// # Arguments
/// * `path` - Path string in any separator convention
///
/// # Returns
/// The normalized string. Relative stays relative, absolute stays absolute.
pub fn normalize_path(path: &str) -> String {
    let mut normalized: String = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for ch in path.chars() {
        let ch = if ch == '\\' { '/' } else { ch };
        if ch == '/' {
            if !previous_was_separator {
                normalized.push('/');
            }
            previous_was_separator = true;
        } else {
            normalized.push(ch);
            previous_was_separator = false;
        }
    }
    normalized
}

/// Normalize a sequence of path strings element-wise, preserving order.
pub fn normalize_paths<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths.into_iter().map(|path| normalize_path(path.as_ref())).collect()
}

/// Return the final non-empty segment of a normalized path.
///
/// Trailing separators are ignored, so `"a/b/"` and `"a/b"` both yield
/// `"b"`. An empty path or a bare `"/"` yields the empty string.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or("")
}

/// Return the lower-cased extension of a path's basename, if it has one.
///
/// The extension is everything after the last `.` in the basename, so dots
/// in parent segments never count. `None` when the basename contains no dot
/// or when nothing follows the last one. A leading-dot name such as
/// `".profile"` reports `"profile"`.
pub fn file_extension(path: &str) -> Option<String> {
    let name: &str = base_name(path);
    match name.rsplit_once('.') {
        Some((_, extension)) if !extension.is_empty() => Some(extension.to_lowercase()),
        _ => None,
    }
}

/// Normalize a path lexically, resolving `.` and `..` components without
/// touching the filesystem.
///
/// A `..` cancels the nearest preceding normal segment. `..` components
/// with nothing left to cancel are preserved, so a relative input may
/// still begin with `..` after normalization.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut resolved: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Only a normal segment can absorb a `..`; a retained `..`
                // or the root stays put.
                if matches!(resolved.last(), Some(Component::Normal(_))) {
                    resolved.pop();
                } else {
                    resolved.push(component);
                }
            }
            other => resolved.push(other),
        }
    }
    resolved.iter().collect()
}

/// Check whether `path` stays inside `root` after lexical normalization.
///
/// Used to refuse declared upload names that climb out of their destination
/// with `..` segments. Purely lexical: symlinks are not resolved.
pub fn is_within_root(path: &Path, root: &Path) -> bool {
    let normalized_path: PathBuf = lexical_normalize(path);
    let normalized_root: PathBuf = lexical_normalize(root);
    normalized_path.starts_with(&normalized_root)
}
