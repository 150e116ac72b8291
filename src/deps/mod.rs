//! Zig package dependency checking
//!
//! Finds `build.zig.zon` manifests, pulls the dependency URLs out of them,
//! and compares the package hash of each pinned URL against the hash of its
//! unpinned base URL using `zig fetch`.

mod checker;
mod discovery;
mod fetch;
pub mod zon;

pub use checker::{CheckOptions, Checker, DependencyReport, DependencyStatus};
pub use discovery::{Dependencies, ManifestScanner};
pub use fetch::{Fetcher, ZigFetcher};

use thiserror::Error;

/// Failures callers may want to tell apart
#[derive(Debug, Error)]
pub enum DepsError {
    /// Dependency URL without a `#<ref>` fragment
    #[error("Unsupported URL format: {url}")]
    UnsupportedUrl { url: String },

    /// The zig executable could not be located
    #[error("zig executable '{binary}' not found (set zig.binary or pass --zig)")]
    ZigNotFound { binary: String },

    /// `zig fetch` exited unsuccessfully
    #[error("`{command}` failed ({status}): {stderr}")]
    FetchFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// `zig fetch` did not finish in time
    #[error("`{command}` timed out after {secs}s")]
    Timeout { command: String, secs: u64 },
}

/// Get the base URL (everything before the first `#`) from a pinned one
pub fn base_url(url: &str) -> Result<&str, DepsError> {
    match url.split_once('#') {
        Some((base, _)) => Ok(base),
        None => Err(DepsError::UnsupportedUrl {
            url: url.to_string(),
        }),
    }
}

/// First `len` characters of a package hash, for display
pub fn short_hash(hash: &str, len: usize) -> &str {
    match hash.char_indices().nth(len) {
        Some((end, _)) => &hash[..end],
        None => hash,
    }
}
