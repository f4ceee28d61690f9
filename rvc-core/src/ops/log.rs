//! Commit history and the repository action log.

use crate::helpers::store::Repository;
use crate::types::{ActionLog, Commit, HistoryEntry};
use crate::VcsError;

/// Commits of the active branch, newest first.
///
/// Entries whose `commit.json` has vanished or no longer parses are
/// evicted from the history file and skipped rather than surfaced as
/// errors; a listing should never wedge on one corrupt record.
pub fn history(repo: &Repository) -> Result<Vec<HistoryEntry>, VcsError> {
    let branch = repo.active_branch()?;
    let mut history = repo.read_history(&branch)?;

    let mut entries = Vec::with_capacity(history.len());
    let mut dangling = Vec::new();
    for (timestamp, id) in history.iter().rev() {
        let commit_file = repo.layout().commit_file(&branch, id);
        if !commit_file.is_file() {
            dangling.push(timestamp.clone());
            continue;
        }
        match Commit::load(&commit_file) {
            Ok(commit) => entries.push(HistoryEntry {
                timestamp: timestamp.clone(),
                commit,
            }),
            Err(e) if e.is_corrupt() => dangling.push(timestamp.clone()),
            Err(e) => return Err(e),
        }
    }

    if !dangling.is_empty() {
        for timestamp in &dangling {
            history.remove(timestamp);
        }
        repo.write_history(&branch, &history)?;
    }

    Ok(entries)
}

/// The append-only action log, oldest first.
pub fn logs(repo: &Repository) -> Result<ActionLog, VcsError> {
    repo.read_log()
}
