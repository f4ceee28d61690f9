//! Stage files into the active branch's index.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::helpers::hash::hash_file;
use crate::helpers::store::Repository;
use crate::types::{path_key, AddSummary, FileState, IndexEntry};
use crate::VcsError;

/// Add a file or directory (recursively) to the active branch's index.
///
/// `target` is resolved relative to the repository root. An entry that
/// is already Tracked with an identical content hash is skipped, so
/// re-adding an unchanged file is an idempotent no-op. Per-file I/O
/// failures are counted and do not abort the batch.
///
/// # Errors
///
/// * `Missing` - `target` does not exist, or the active index is gone
pub fn add(repo: &Repository, target: &Path) -> Result<AddSummary, VcsError> {
    let branch = repo.active_branch()?;
    let mut index = repo.read_index(&branch)?;

    let target_path = repo.root().join(target);
    let files = collect_files(&target_path)?;

    let mut summary = AddSummary::default();

    for file in &files {
        let relative = match file.strip_prefix(repo.root()) {
            Ok(p) => p,
            Err(_) => {
                summary.failed += 1;
                continue;
            }
        };
        let key = path_key(relative);

        let file_hash = match hash_file(file) {
            Ok(h) => h,
            Err(_) => {
                summary.failed += 1;
                continue;
            }
        };

        if let Some(existing) = index.get(&key) {
            if existing.status == FileState::Tracked && existing.hash == file_hash {
                summary.skipped += 1;
                continue;
            }
        }

        index.insert(key, IndexEntry::tracked(file_hash));
        summary.added += 1;
    }

    repo.write_index(&branch, &index)?;
    Ok(summary)
}

/// All regular files under `target`, or `target` itself. The control
/// directory is never staged.
fn collect_files(target: &Path) -> Result<Vec<PathBuf>, VcsError> {
    if target.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(target)
            .into_iter()
            .filter_entry(|e| e.file_name() != crate::helpers::layout::CONTROL_DIR)
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() {
                files.push(entry.path().to_path_buf());
            }
        }
        Ok(files)
    } else if target.is_file() {
        Ok(vec![target.to_path_buf()])
    } else {
        Err(VcsError::missing(target))
    }
}
