//! Error type for package download and extraction.

use std::io;
use std::path::PathBuf;

use crate::transport::TransportError;

/// Why the favicon package could not be fetched or unpacked.
///
/// Only raised by the explicit unpack step; a parsed result stays valid.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("cannot download file at {url}: {source}")]
    DownloadError {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("cannot open package {path}, invalid zip file? ({reason})")]
    ArchiveOpenError { path: PathBuf, reason: String },

    #[error("archive entry {name:?} escapes the extraction directory")]
    UnsafeEntry { name: String },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
}
