//! File copy utilities.

use fs_err as fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::VcsError;

/// Copy a file, creating the destination's parent directories.
pub fn safe_copy(source: &Path, destination: &Path) -> Result<(), VcsError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, destination)?;
    Ok(())
}

/// Recursively copy every file under `source` into `destination`,
/// preserving relative paths.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<(), VcsError> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| {
            VcsError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "walk failed")
            }))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| VcsError::corrupt(entry.path()))?;
        safe_copy(entry.path(), &destination.join(relative))?;
    }
    Ok(())
}
