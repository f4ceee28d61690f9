//! Working-tree status against the active branch's index.

use std::collections::BTreeSet;

use crate::helpers::store::Repository;
use crate::types::{FileState, StatusReport};
use crate::VcsError;

/// Classify every file under the root as staged, committed, or
/// untracked. Paths under the control directory are ignored.
pub fn status(repo: &Repository) -> Result<StatusReport, VcsError> {
    let branch = repo.active_branch()?;
    let index = repo.read_index(&branch)?;

    let mut staged = Vec::new();
    let mut committed = Vec::new();
    for (key, entry) in &index {
        match entry.status {
            FileState::Tracked => staged.push(key.clone()),
            FileState::Committed => committed.push(key.clone()),
        }
    }

    let known: BTreeSet<&String> = index.keys().collect();
    let mut untracked = Vec::new();
    for entry in walkdir::WalkDir::new(repo.root())
        .into_iter()
        .filter_entry(|e| e.file_name() != crate::helpers::layout::CONTROL_DIR)
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(repo.root())
            .map_err(|_| VcsError::corrupt(entry.path()))?;
        let key = crate::types::path_key(rel);
        if !known.contains(&key) {
            untracked.push(key);
        }
    }
    untracked.sort();

    Ok(StatusReport {
        staged,
        committed,
        untracked,
    })
}
