//! Snapshot staged files into a commit.

use fs_err as fs;

use crate::helpers::copy::safe_copy;
use crate::helpers::hash::hash_bytes;
use crate::helpers::store::{timestamp_key, Repository};
use crate::types::{Commit, CommitResult, FileState};
use crate::VcsError;

/// Commit every Tracked entry of the active branch.
///
/// The commit id is the digest of `"{author} {message} {timestamp}"` -
/// deliberately metadata-derived rather than content-addressed, so two
/// commits with identical author, message, and instant would collide.
/// This mirrors the historical behavior and is documented rather than
/// fixed.
///
/// The operation is all-or-nothing: every Tracked file is checked for
/// existence, then copied into `commits/<id>/`, and only then is the
/// index mutation flushed in a single write. A failure mid-copy leaves
/// no entry Committed and removes the speculative commit directory.
///
/// # Errors
///
/// * `NoChanges` - no entry has status Tracked
/// * `Missing` - a Tracked file vanished from the working tree
pub fn commit(repo: &Repository, message: &str) -> Result<CommitResult, VcsError> {
    let config = repo.read_config()?;
    let branch = &config.branch;
    let mut index = repo.read_index(branch)?;

    let tracked: Vec<String> = index
        .iter()
        .filter(|(_, e)| e.status == FileState::Tracked)
        .map(|(k, _)| k.clone())
        .collect();

    if tracked.is_empty() {
        return Err(VcsError::NoChanges);
    }

    // Existence pass before any copy: partial commits are not allowed.
    for key in &tracked {
        let source = repo.layout().working_path(key);
        if !source.is_file() {
            return Err(VcsError::missing(source));
        }
    }

    let timestamp = timestamp_key();
    let id = hash_bytes(format!("{} {} {}", config.author, message, timestamp).as_bytes());
    let commit_dir = repo.layout().commit_dir(branch, &id);
    fs::create_dir_all(&commit_dir)?;

    for key in &tracked {
        let source = repo.layout().working_path(key);
        if let Err(e) = safe_copy(&source, &commit_dir.join(key)) {
            // Leave no half-commit behind.
            let _ = fs::remove_dir_all(&commit_dir);
            return Err(e);
        }
    }

    for key in &tracked {
        if let Some(entry) = index.get_mut(key) {
            entry.commit(&id);
        }
    }

    let commit = Commit {
        id: id.clone(),
        message: message.to_string(),
        author: config.author.clone(),
        timestamp: timestamp.clone(),
        files: tracked.clone(),
    };
    commit.save(&repo.layout().commit_file(branch, &id))?;

    let mut history = repo.read_history(branch)?;
    history.insert(timestamp, id.clone());
    repo.write_history(branch, &history)?;

    repo.write_index(branch, &index)?;
    repo.append_log(format!(
        "{} committed {} changes to {} branch.",
        config.author,
        tracked.len(),
        branch
    ))?;

    Ok(CommitResult {
        id,
        message: message.to_string(),
        files: tracked,
    })
}
