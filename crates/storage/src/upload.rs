//! Upload validation and placement.
//!
//! The pipeline validates each pending upload against its configured
//! extension and size policy, resolves a destination path (optionally
//! recreating the declared relative directory chain), and moves the
//! temporary file there. Verdicts are per item: a rejected or failed item
//! never aborts the rest of the batch, and items already placed stay in
//! place.

use std::fs;
use std::path::{Path, PathBuf};

use filekeeper_common::{
    base_name, file_extension, is_within_root, normalize_path, Reporter, MAX_SIZE_LIMIT,
};

use crate::error::{RejectionReason, UploadError};
use crate::extensions::{ExtensionSet, ExtensionSource};
use crate::size_limit::SizeLimit;
use crate::types::{PendingUpload, UploadOutcome};

/// Options controlling a single batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Create the destination directory when it does not exist.
    pub create_destination: bool,
    /// Recreate the relative directory chain from each declared name.
    pub preserve_directories: bool,
    /// Accept a destination that already contains entries.
    pub allow_non_empty: bool,
}

impl BatchOptions {
    /// Create options with all flags off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the destination directory when missing.
    pub fn with_create_destination(mut self, create: bool) -> Self {
        self.create_destination = create;
        self
    }

    /// Recreate declared relative directories under the destination.
    pub fn with_preserve_directories(mut self, preserve: bool) -> Self {
        self.preserve_directories = preserve;
        self
    }

    /// Accept a destination that already contains entries.
    pub fn with_allow_non_empty(mut self, allow: bool) -> Self {
        self.allow_non_empty = allow;
        self
    }
}

/// Validates pending uploads and moves them into place.
///
/// A pipeline is not usable until an allowed-extension set is configured;
/// the forbidden set and the size limit have working defaults (no forbidden
/// extensions, 2MB).
#[derive(Debug, Clone, Default)]
pub struct UploadPipeline {
    allowed: Option<ExtensionSet>,
    forbidden: Option<ExtensionSet>,
    size_limit: SizeLimit,
}

impl UploadPipeline {
    /// Create a pipeline with no extension policy and the default limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the allowed-extension set.
    pub fn set_allowed(&mut self, set: ExtensionSet) {
        self.allowed = Some(set);
    }

    /// Replace the forbidden-extension set. Forbidden wins over allowed.
    pub fn set_forbidden(&mut self, set: ExtensionSet) {
        self.forbidden = Some(set);
    }

    /// Load the allowed-extension set from a source.
    ///
    /// # Errors
    /// Loader errors propagate unchanged.
    pub fn load_allowed(&mut self, source: &ExtensionSource) -> Result<(), UploadError> {
        self.allowed = Some(ExtensionSet::load(source)?);
        Ok(())
    }

    /// Load the forbidden-extension set from a source.
    ///
    /// # Errors
    /// Loader errors propagate unchanged.
    pub fn load_forbidden(&mut self, source: &ExtensionSource) -> Result<(), UploadError> {
        self.forbidden = Some(ExtensionSet::load(source)?);
        Ok(())
    }

    /// The configured allowed-extension set, if any.
    pub fn allowed(&self) -> Option<&ExtensionSet> {
        self.allowed.as_ref()
    }

    /// Replace the size limit. Replacement, not accumulation.
    ///
    /// # Errors
    /// `SizeLimitOutOfRange` above 1TB.
    pub fn set_size_limit(&mut self, limit: SizeLimit) -> Result<(), UploadError> {
        if limit.bytes() > MAX_SIZE_LIMIT {
            return Err(UploadError::SizeLimitOutOfRange {
                bytes: limit.bytes(),
                max: MAX_SIZE_LIMIT,
            });
        }
        self.size_limit = limit;
        Ok(())
    }

    /// The active size limit.
    pub fn size_limit(&self) -> SizeLimit {
        self.size_limit
    }

    /// Whether a declared name's extension is in the allowed set.
    ///
    /// A name without an extension is never allowed. The forbidden set is
    /// not consulted here; batch validation applies it on top.
    ///
    /// # Errors
    /// `PolicyNotConfigured` when no allowed set has been configured.
    pub fn check_extension(&self, name: &str) -> Result<bool, UploadError> {
        let allowed: &ExtensionSet =
            self.allowed.as_ref().ok_or(UploadError::PolicyNotConfigured)?;
        Ok(match file_extension(&normalize_path(name)) {
            Some(extension) => allowed.contains(&extension),
            None => false,
        })
    }

    /// Validate and place a batch of pending uploads.
    ///
    /// Preflight failures (missing policy, unusable destination) fail the
    /// whole batch before anything moves. After preflight every item gets
    /// exactly one outcome, in input order: the size check runs first, then
    /// the extension check, then placement and the move itself.
    ///
    /// # Errors
    /// `PolicyNotConfigured`, `DestinationUnreadable`, or
    /// `DestinationNotEmpty` from preflight.
    pub fn upload_batch(
        &self,
        batch: Vec<PendingUpload>,
        destination: &Path,
        options: &BatchOptions,
        reporter: &dyn Reporter,
    ) -> Result<Vec<UploadOutcome>, UploadError> {
        if self.allowed.is_none() {
            return Err(UploadError::PolicyNotConfigured);
        }
        self.prepare_destination(destination, options, reporter)?;

        let mut outcomes: Vec<UploadOutcome> = Vec::with_capacity(batch.len());
        for item in batch {
            outcomes.push(self.process_item(item, destination, options, reporter));
        }
        Ok(outcomes)
    }

    /// Probe, create, and admit the destination directory.
    fn prepare_destination(
        &self,
        destination: &Path,
        options: &BatchOptions,
        reporter: &dyn Reporter,
    ) -> Result<(), UploadError> {
        if !destination.exists() {
            if !options.create_destination {
                return Err(UploadError::DestinationUnreadable {
                    path: display_path(destination),
                    message: "does not exist".to_string(),
                });
            }
            fs::create_dir_all(destination).map_err(|err| UploadError::DestinationUnreadable {
                path: display_path(destination),
                message: err.to_string(),
            })?;
            reporter.notice(&format!("Created destination {}", display_path(destination)));
            return Ok(());
        }

        let mut children = fs::read_dir(destination).map_err(|err| {
            UploadError::DestinationUnreadable {
                path: display_path(destination),
                message: err.to_string(),
            }
        })?;
        if children.next().is_some() && !options.allow_non_empty {
            return Err(UploadError::DestinationNotEmpty {
                path: display_path(destination),
            });
        }
        Ok(())
    }

    /// Validate and place one item. Never fails the batch.
    fn process_item(
        &self,
        item: PendingUpload,
        destination: &Path,
        options: &BatchOptions,
        reporter: &dyn Reporter,
    ) -> UploadOutcome {
        let limit: u64 = self.size_limit.bytes();
        if item.size > limit {
            return UploadOutcome::Rejected {
                name: item.name,
                reason: RejectionReason::SizeRejected { declared: item.size, limit },
            };
        }

        if !self.admits_extension(&item.name) {
            return UploadOutcome::Rejected {
                name: item.name,
                reason: RejectionReason::ExtensionRejected,
            };
        }

        let target: PathBuf = match resolve_target(&item.name, destination, options) {
            Ok(target) => target,
            Err(message) => {
                reporter.warning(&format!("Refusing {}: {message}", item.name));
                return UploadOutcome::Rejected {
                    name: item.name,
                    reason: RejectionReason::IoFailure { message },
                };
            }
        };

        match move_file(&item.source, &target) {
            Ok(()) => UploadOutcome::Stored {
                name: item.name,
                path: normalize_path(&target.to_string_lossy()),
            },
            Err(err) => {
                reporter.warning(&format!("Failed to store {}: {err}", item.name));
                UploadOutcome::Rejected {
                    name: item.name,
                    reason: RejectionReason::IoFailure { message: err.to_string() },
                }
            }
        }
    }

    /// Allowed-set membership with the forbidden set taking precedence.
    fn admits_extension(&self, name: &str) -> bool {
        let Some(extension) = file_extension(&normalize_path(name)) else {
            return false;
        };
        if let Some(forbidden) = &self.forbidden {
            if forbidden.contains(&extension) {
                return false;
            }
        }
        self.allowed
            .as_ref()
            .is_some_and(|allowed| allowed.contains(&extension))
    }
}

/// Final path for a declared name, creating preserved directories.
///
/// The declared name is normalized first and must be relative. With
/// `preserve_directories` the whole relative chain lands under the
/// destination; otherwise only the basename does. Either way the result
/// must stay inside the destination once `..` segments are resolved.
fn resolve_target(
    name: &str,
    destination: &Path,
    options: &BatchOptions,
) -> Result<PathBuf, String> {
    let declared: String = normalize_path(name);
    if Path::new(&declared).has_root() {
        return Err(format!("declared name {name} is absolute"));
    }
    let target: PathBuf = if options.preserve_directories {
        destination.join(&declared)
    } else {
        destination.join(base_name(&declared))
    };

    if !is_within_root(&target, destination) {
        return Err(format!("declared name {name} escapes the destination"));
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|err| err.to_string())?;
    }
    Ok(target)
}

/// Move a file, falling back to copy+remove when rename crosses devices.
fn move_file(source: &Path, target: &Path) -> std::io::Result<()> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }
    fs::copy(source, target)?;
    fs::remove_file(source)
}

fn display_path(path: &Path) -> String {
    normalize_path(&path.to_string_lossy())
}
