//! Text-file detection for the merge engine.

use fs_err::File;
use std::io::Read;
use std::path::Path;

/// Bytes sampled from the start of the file.
pub const SAMPLE_SIZE: usize = 8000;

/// Printable-byte heuristic over a sampled prefix.
///
/// A file is text when the first [`SAMPLE_SIZE`] bytes contain no NUL
/// and no control bytes outside HT..CR (and no DEL). Unreadable files
/// are treated as non-text.
pub fn is_text_file(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut buffer = [0u8; SAMPLE_SIZE];
    let bytes_read = match file.read(&mut buffer) {
        Ok(n) => n,
        Err(_) => return false,
    };

    buffer[..bytes_read]
        .iter()
        .all(|&b| (9..=13).contains(&b) || (b >= 32 && b != 127))
}
