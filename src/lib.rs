//! Filesystem indexing and policy-checked upload placement.
//!
//! filekeeper turns directory trees into metadata-enriched scan records and
//! validates uploaded files against extension and size policies before
//! moving them into place. The [`FileManager`] facade covers the common
//! flows; the member crates are re-exported for direct use.
//!
//! # Example
//! ```no_run
//! use filekeeper::FileManager;
//!
//! # fn main() -> Result<(), filekeeper::FileSystemError> {
//! let mut manager = FileManager::new();
//! manager.set_directory("./assets")?;
//! manager.toggle_details();
//! let listing = manager.scan(true)?;
//! for entry in &listing {
//!     println!("{} ({:?} bytes)", entry.path, entry.size);
//! }
//! # Ok(())
//! # }
//! ```

pub use filekeeper_common::{
    base_name, file_extension, normalize_path, normalize_paths, report_fn, FnReporter,
    LogReporter, NoopReporter, Reporter, Severity, ALLOWED_EXTENSIONS_RESOURCE,
    DEFAULT_SIZE_LIMIT, FORBIDDEN_EXTENSIONS_RESOURCE, MAX_SIZE_LIMIT,
};
pub use filekeeper_filesystem::{
    annotate_extension, annotate_modified, annotate_name, annotate_size, read_lines,
    remove_tree, reorder, reorder_entries, DirectoryScanner, Entries, Entry, FileSystemError,
    OrderPolicy, RemovalOutcome, ScanFilter, ScanResult, SortOrder,
};
pub use filekeeper_storage::{
    BatchOptions, ExtensionSet, ExtensionSource, PendingUpload, RejectionReason, SizeLimit,
    UploadError, UploadOutcome, UploadPipeline,
};

/// Facade over the scanner, enrichment, removal, and upload components.
///
/// The manager owns a [`DirectoryScanner`] and a reporting sink. With the
/// details flag on (see [`FileManager::toggle_details`]) every scan comes
/// back enriched with size, extension, name, and modification time.
pub struct FileManager {
    scanner: DirectoryScanner,
    detailed: bool,
    reporter: Box<dyn Reporter>,
}

impl FileManager {
    /// Create a manager with no base directory and the log-backed reporter.
    pub fn new() -> Self {
        Self {
            scanner: DirectoryScanner::new(),
            detailed: false,
            reporter: Box::new(LogReporter),
        }
    }

    /// Create a manager rooted at `path`.
    ///
    /// # Errors
    /// Same as [`FileManager::set_directory`].
    pub fn with_directory(path: &str) -> Result<Self, FileSystemError> {
        let mut manager = Self::new();
        manager.set_directory(path)?;
        Ok(manager)
    }

    /// Replace the reporting sink.
    pub fn with_reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Apply a scan filter to subsequent scans.
    pub fn with_filter(mut self, filter: ScanFilter) -> Self {
        self.scanner = std::mem::take(&mut self.scanner).with_filter(filter);
        self
    }

    /// Set the base directory used by scans and removal.
    ///
    /// The filesystem root `"/"` is redirected to `"./"`. The path is
    /// normalized and probed before it is adopted; on failure the previous
    /// directory stays configured.
    ///
    /// # Errors
    /// `PathNotConfigured` for an empty path, `DirectoryUnreadable` when the
    /// directory cannot be opened.
    pub fn set_directory(&mut self, path: &str) -> Result<(), FileSystemError> {
        if path.is_empty() {
            return Err(FileSystemError::PathNotConfigured);
        }
        let path: &str = if path == "/" { "./" } else { path };
        self.scanner.set_root(path)
    }

    /// The configured base directory, if any.
    pub fn directory(&self) -> Option<&str> {
        self.scanner.root()
    }

    /// Flip whether scans enrich their entries with details.
    pub fn toggle_details(&mut self) {
        self.detailed = !self.detailed;
    }

    /// Whether scans currently enrich their entries.
    pub fn details(&self) -> bool {
        self.detailed
    }

    /// Scan the base directory, recursively or flat.
    ///
    /// # Errors
    /// `PathNotConfigured` without a base directory, `DirectoryUnreadable`
    /// when a directory cannot be opened.
    pub fn scan(&mut self, recursive: bool) -> Result<ScanResult, FileSystemError> {
        let result: ScanResult = if recursive {
            self.scanner.recursive_scan(self.reporter.as_ref())?
        } else {
            self.scanner.scan(self.reporter.as_ref())?
        };
        Ok(self.maybe_enrich(result))
    }

    /// Scan an explicit directory, adopting it as the base directory first.
    ///
    /// # Errors
    /// Same as [`FileManager::set_directory`] and [`FileManager::scan`].
    pub fn scan_path(&mut self, recursive: bool, path: &str) -> Result<ScanResult, FileSystemError> {
        self.set_directory(path)?;
        self.scan(recursive)
    }

    /// The result of the most recent scan, before enrichment.
    pub fn last_scan(&self) -> Option<&ScanResult> {
        self.scanner.last_scan()
    }

    /// Build an upload pipeline with its allowed set loaded from `source`.
    ///
    /// # Errors
    /// Loader errors propagate unchanged.
    pub fn uploader(&self, source: &ExtensionSource) -> Result<UploadPipeline, UploadError> {
        let mut pipeline = UploadPipeline::new();
        pipeline.load_allowed(source)?;
        Ok(pipeline)
    }

    /// Permanently delete the base directory's tree, item by item.
    ///
    /// # Errors
    /// `PathNotConfigured` without a base directory, `DirectoryUnreadable`
    /// when the tree cannot be walked.
    pub fn destroy(&self) -> Result<Vec<RemovalOutcome>, FileSystemError> {
        let root: &str = self.scanner.root().ok_or(FileSystemError::PathNotConfigured)?;
        remove_tree(root, self.reporter.as_ref())
    }

    /// Lines of a human-readable file.
    ///
    /// # Errors
    /// `FileUnreadable` when the file is missing or not valid UTF-8.
    pub fn file_content(&self, path: &str) -> Result<Vec<String>, FileSystemError> {
        read_lines(path)
    }

    /// Run all four enrichment passes when the details flag is on.
    fn maybe_enrich(&self, result: ScanResult) -> ScanResult {
        if !self.detailed {
            return result;
        }
        let reporter: &dyn Reporter = self.reporter.as_ref();
        let mut entries: Entries = Entries::Many(result);
        entries = annotate_size(entries, reporter);
        entries = annotate_extension(entries, reporter);
        entries = annotate_name(entries);
        entries = annotate_modified(entries, reporter);
        ScanResult { entries: entries.into_vec() }
    }
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}
