//! Glob filtering for scan results.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::FileSystemError;

/// Include/exclude glob patterns applied to paths relative to the scan root.
///
/// An empty include list admits everything; exclude patterns always win. A
/// filtered-out directory is omitted from the result, but a recursive scan
/// still descends into it, so deeper matches remain reachable.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
    include_set: Option<GlobSet>,
    exclude_set: Option<GlobSet>,
}

impl ScanFilter {
    /// Create a filter that admits every path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter from include patterns only.
    ///
    /// # Errors
    /// `InvalidFilterPattern` when a pattern fails to compile.
    pub fn include(patterns: Vec<String>) -> Result<Self, FileSystemError> {
        Self::with_patterns(patterns, Vec::new())
    }

    /// Create a filter from exclude patterns only.
    ///
    /// # Errors
    /// `InvalidFilterPattern` when a pattern fails to compile.
    pub fn exclude(patterns: Vec<String>) -> Result<Self, FileSystemError> {
        Self::with_patterns(Vec::new(), patterns)
    }

    /// Create a filter from include and exclude patterns.
    ///
    /// # Errors
    /// `InvalidFilterPattern` when a pattern fails to compile.
    pub fn with_patterns(
        include: Vec<String>,
        exclude: Vec<String>,
    ) -> Result<Self, FileSystemError> {
        let include_set: Option<GlobSet> = compile_set(&include)?;
        let exclude_set: Option<GlobSet> = compile_set(&exclude)?;
        Ok(Self {
            include_patterns: include,
            exclude_patterns: exclude,
            include_set,
            exclude_set,
        })
    }

    /// Whether no patterns are configured at all.
    pub fn is_empty(&self) -> bool {
        self.include_patterns.is_empty() && self.exclude_patterns.is_empty()
    }

    /// Check whether a root-relative path passes the filter.
    pub fn matches(&self, relative_path: &str) -> bool {
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(relative_path) {
                return false;
            }
        }
        match &self.include_set {
            Some(include) => include.is_match(relative_path),
            None => true,
        }
    }

    /// The configured include patterns.
    pub fn include_patterns(&self) -> &[String] {
        &self.include_patterns
    }

    /// The configured exclude patterns.
    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }
}

/// Compile a pattern list into a glob set. `None` for an empty list.
fn compile_set(patterns: &[String]) -> Result<Option<GlobSet>, FileSystemError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|err| FileSystemError::InvalidFilterPattern {
            pattern: pattern.clone(),
            reason: err.to_string(),
        })?;
        builder.add(glob);
    }
    let set = builder.build().map_err(|err| FileSystemError::InvalidFilterPattern {
        pattern: patterns.join(", "),
        reason: err.to_string(),
    })?;
    Ok(Some(set))
}
