//! Error type for the walk / project / prepare / register stages.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure is terminal for the run; nothing is retried.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Network failure, non-2xx status, or undecodable listing.
    #[error("Remote fetch failed for {url}: {reason}")]
    RemoteFetch { url: String, reason: String },

    /// Subset does not name at least one path segment.
    #[error("Invalid subset {0:?}: expected at least one path segment")]
    SubsetFormat(String),

    /// Creating or writing the manifest, or a directory it references.
    #[error("Manifest write failed at {}: {source}", path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external registration command could not run or exited non-zero.
    #[error("Registration failed: {0}")]
    Registration(String),
}

impl MirrorError {
    pub(crate) fn remote(url: &str, reason: impl std::fmt::Display) -> Self {
        MirrorError::RemoteFetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        MirrorError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        }
    }
}
