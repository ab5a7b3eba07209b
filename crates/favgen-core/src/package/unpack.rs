//! Zip extraction for favicon packages.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use super::{FetchError, Unpacker};

/// Extracts zip archives with the `zip` crate.
///
/// Entry names that would land outside the destination (absolute paths,
/// `..` components) are rejected instead of written.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipUnpacker;

impl Unpacker for ZipUnpacker {
    fn unpack(&self, archive_path: &Path, dest: &Path) -> Result<usize, FetchError> {
        let open_error = |reason: String| FetchError::ArchiveOpenError {
            path: archive_path.to_path_buf(),
            reason,
        };
        let file = File::open(archive_path).map_err(|e| open_error(e.to_string()))?;
        // Owned by this frame: the handle is closed on every return path.
        let mut archive =
            zip::ZipArchive::new(BufReader::new(file)).map_err(|e| open_error(e.to_string()))?;

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| FetchError::ExtractionFailed {
                    path: archive_path.to_path_buf(),
                    source: e.into(),
                })?;
            let relative = entry.enclosed_name().ok_or_else(|| FetchError::UnsafeEntry {
                name: entry.name().to_string(),
            })?;
            let out_path = dest.join(relative);

            if entry.is_dir() {
                create_dir(&out_path)?;
                continue;
            }
            if let Some(parent) = out_path.parent() {
                create_dir(parent)?;
            }

            let extraction_failed = |source: io::Error| FetchError::ExtractionFailed {
                path: out_path.clone(),
                source,
            };
            let mut out = File::create(&out_path).map_err(extraction_failed)?;
            io::copy(&mut entry, &mut out).map_err(extraction_failed)?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                    .map_err(extraction_failed)?;
            }
        }

        tracing::debug!(
            "extracted {} entries from {} into {}",
            archive.len(),
            archive_path.display(),
            dest.display()
        );
        Ok(archive.len())
    }
}

fn create_dir(path: &Path) -> Result<(), FetchError> {
    fs::create_dir_all(path).map_err(|source| FetchError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source,
    })
}
