//! Blake3 hashing utilities.
//!
//! One digest serves two purposes: file-content identity (drives the
//! "skip unchanged tracked file" add optimization) and commit-id
//! derivation. Output is always lowercase hex, 64 characters, with no
//! salt or other per-run input.

use fs_err as fs;
use fs_err::File;
use memmap2::Mmap;
use std::io::Read;
use std::path::Path;

use crate::VcsError;

/// Threshold for memory-mapped I/O (16KB).
pub const MMAP_THRESHOLD: u64 = 16 * 1024;

/// Compute the Blake3 hash of a byte slice.
pub fn hash_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Compute the Blake3 hash of a file.
///
/// Uses memory-mapped I/O for files >= 16KB, buffered reads otherwise.
pub fn hash_file(path: &Path) -> Result<String, VcsError> {
    let metadata = fs::metadata(path)?;
    let size = metadata.len();

    if size >= MMAP_THRESHOLD {
        hash_mmap(path)
    } else {
        hash_read(path)
    }
}

fn hash_mmap(path: &Path) -> Result<String, VcsError> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(blake3::hash(&mmap).to_hex().to_string())
}

fn hash_read(path: &Path) -> Result<String, VcsError> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();

    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}
