//! Favicon package fetching: download the archive, unpack it locally.
//!
//! Never triggered by parsing; the caller decides when to spend the I/O.
//!
//! Layout after a successful call with `archive_name = "favicon_package"`:
//!
//! ```text
//! <output_dir>/favicon_package.zip
//! <output_dir>/favicon_package/...        extracted files
//! <output_dir>/favicon_preview.png        only when the result has a preview URL
//! ```

mod error;
mod unpack;

use std::fs;
use std::path::Path;

use crate::response::FaviconResult;
use crate::transport::{CurlTransport, Downloader};

pub use error::FetchError;
pub use unpack::ZipUnpacker;

/// Archive base name used when the caller does not pick one.
pub const DEFAULT_ARCHIVE_NAME: &str = "favicon_package";

/// File name of the downloaded preview picture.
pub const PREVIEW_FILE_NAME: &str = "favicon_preview.png";

/// Archive extraction capability.
pub trait Unpacker {
    /// Extracts every entry of `archive` into the existing directory `dest`.
    /// Returns the number of entries processed.
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<usize, FetchError>;
}

/// Downloads and unpacks favicon packages.
#[derive(Debug, Clone, Default)]
pub struct PackageFetcher<D = CurlTransport, U = ZipUnpacker> {
    downloader: D,
    unpacker: U,
}

impl PackageFetcher {
    /// Fetcher that downloads with `transport` and extracts with [`ZipUnpacker`].
    pub fn with_curl(transport: CurlTransport) -> Self {
        Self::new(transport, ZipUnpacker)
    }
}

impl<D: Downloader, U: Unpacker> PackageFetcher<D, U> {
    pub fn new(downloader: D, unpacker: U) -> Self {
        Self {
            downloader,
            unpacker,
        }
    }

    /// Downloads `result.package_url` to `output_dir/<archive_name>.zip`,
    /// extracts it into `output_dir/<archive_name>` and records that directory
    /// in `result.package_path`. Also fetches the preview picture when the
    /// result has one.
    ///
    /// Returns immediately, touching nothing, when there is no package URL.
    pub fn download_and_unpack(
        &self,
        result: &mut FaviconResult,
        output_dir: &Path,
        archive_name: &str,
    ) -> Result<(), FetchError> {
        let Some(package_url) = result.package_url.clone() else {
            tracing::debug!("no package URL in result; nothing to unpack");
            return Ok(());
        };

        let archive_path = output_dir.join(format!("{}.zip", archive_name));
        self.download(&package_url, &archive_path)?;

        let extracted_path = output_dir.join(archive_name);
        fs::create_dir_all(&extracted_path).map_err(|source| {
            FetchError::DirectoryCreationFailed {
                path: extracted_path.clone(),
                source,
            }
        })?;

        let entries = self.unpacker.unpack(&archive_path, &extracted_path)?;
        tracing::info!(
            "unpacked {} entries from {} into {}",
            entries,
            package_url,
            extracted_path.display()
        );
        result.package_path = Some(extracted_path);

        if let Some(preview_url) = result.preview_url.clone() {
            let preview_path = output_dir.join(PREVIEW_FILE_NAME);
            self.download(&preview_url, &preview_path)?;
            result.preview_path = Some(preview_path);
        }

        Ok(())
    }

    fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        match self.downloader.download_to(url, dest) {
            Ok(bytes) => {
                tracing::debug!("downloaded {} bytes from {}", bytes, url);
                Ok(())
            }
            Err(source) => {
                tracing::warn!("download of {} failed: {}", url, source);
                Err(FetchError::DownloadError {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}
