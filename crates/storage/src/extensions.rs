//! Extension allow/deny sets and their JSON resource loader.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::UploadError;

/// Where an extension set comes from.
///
/// Callers state the shape up front instead of handing over a bare string
/// that might be a file path, a single extension, or a whole list.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionSource {
    /// Path to a `.json` document of arbitrarily nested extension arrays.
    Resource(PathBuf),
    /// One literal extension.
    Literal(String),
    /// An in-memory JSON document, flattened like a resource.
    Values(Value),
}

impl ExtensionSource {
    /// Interpret a bare string the conventional way: anything containing a
    /// path separator or ending in `.json` names a resource, everything else
    /// is a single literal extension.
    pub fn from_spec(spec: &str) -> Self {
        let has_separator: bool = spec.contains('/') || spec.contains('\\');
        if has_separator || spec.to_lowercase().ends_with(".json") {
            ExtensionSource::Resource(PathBuf::from(spec))
        } else {
            ExtensionSource::Literal(spec.to_string())
        }
    }
}

/// Flat collection of lower-cased extensions without leading dots.
///
/// Built once during pipeline configuration and read-only afterwards. The
/// flattening keeps encounter order and duplicates; membership is all that
/// matters when checking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl ExtensionSet {
    /// Build a set from a source.
    ///
    /// # Errors
    /// `InvalidResourceType` when a resource path is not `.json`,
    /// `ResourceUnreadable` when it cannot be read or decoded.
    pub fn load(source: &ExtensionSource) -> Result<Self, UploadError> {
        match source {
            ExtensionSource::Resource(path) => Self::from_resource(path),
            ExtensionSource::Literal(extension) => Ok(Self::from_list([extension.as_str()])),
            ExtensionSource::Values(document) => Ok(Self { extensions: flatten(document) }),
        }
    }

    /// Build a set from literal extensions, keeping their order.
    pub fn from_list<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|extension| canonical(extension.as_ref()))
                .collect(),
        }
    }

    fn from_resource(path: &Path) -> Result<Self, UploadError> {
        let is_json: bool = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if !is_json {
            return Err(UploadError::InvalidResourceType {
                path: path.display().to_string(),
            });
        }

        let text: String = fs::read_to_string(path).map_err(|err| {
            UploadError::ResourceUnreadable {
                path: path.display().to_string(),
                message: err.to_string(),
            }
        })?;
        let document: Value = serde_json::from_str(&text).map_err(|err| {
            UploadError::ResourceUnreadable {
                path: path.display().to_string(),
                message: err.to_string(),
            }
        })?;
        Ok(Self { extensions: flatten(&document) })
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, extension: &str) -> bool {
        let wanted: String = canonical(extension);
        self.extensions.iter().any(|candidate| *candidate == wanted)
    }

    /// Whether the set holds no extensions.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Number of extensions, duplicates included.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// The flattened extensions in encounter order.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

/// Lower-case an extension and strip any leading dots.
fn canonical(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// Depth-first flatten of a JSON document into its string leaves.
///
/// Arrays and object values are walked in order; non-string leaves are
/// ignored.
fn flatten(document: &Value) -> Vec<String> {
    let mut collected: Vec<String> = Vec::new();
    collect_leaves(document, &mut collected);
    collected
}

fn collect_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(leaf) => out.push(canonical(leaf)),
        Value::Array(items) => {
            for item in items {
                collect_leaves(item, out);
            }
        }
        Value::Object(fields) => {
            for field in fields.values() {
                collect_leaves(field, out);
            }
        }
        _ => {}
    }
}
