//! Constants shared across filekeeper crates.

/// Default upload size limit in bytes (2MB).
///
/// Every pipeline starts with this cap until a caller replaces it.
pub const DEFAULT_SIZE_LIMIT: u64 = 2 * 1024 * 1024;

/// Largest size limit a pipeline accepts (1TB).
pub const MAX_SIZE_LIMIT: u64 = 1024 * 1024 * 1024 * 1024;

/// Conventional resource file holding the allowed upload extensions.
pub const ALLOWED_EXTENSIONS_RESOURCE: &str = "allowed_extensions.json";

/// Conventional resource file holding the forbidden upload extensions.
pub const FORBIDDEN_EXTENSIONS_RESOURCE: &str = "forbidden_extensions.json";
