use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the catalog store
///
/// The store never panics on I/O. Which of these a caller shows to the
/// user, retries or ignores is the caller's call.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("catalog {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode catalog: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write catalog {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create content directory {path}: {source}")]
    ContentDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to import content into {path}: {source}")]
    Import {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to scan folder {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
