//! Undo the most recent commit on the active branch.

use fs_err as fs;

use crate::helpers::copy::safe_copy;
use crate::helpers::store::Repository;
use crate::types::{Commit, RollbackReport};
use crate::VcsError;

/// Rollback options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollbackOptions {
    /// Snapshot the commit's working-tree files into
    /// `.rvc/backup/backup_<ts>/` before any of them is overwritten.
    pub backup: bool,
}

/// Pop the newest commit from the active branch's history and restore
/// its files into the working tree.
///
/// Restored entries return to Tracked status so the content can be
/// re-committed; `lastCommit` is left pointing at the removed commit as
/// a provenance trace. History entries whose commit directory is gone
/// or whose `commit.json` no longer parses are evicted before the error
/// is raised, so a corrupt tail does not wedge the branch forever.
///
/// # Errors
///
/// * `NoCommits` - the branch history is empty
/// * `CorruptCommit` - the newest entry's snapshot is missing or
///   unparseable (evicted)
pub fn rollback(repo: &Repository, options: RollbackOptions) -> Result<RollbackReport, VcsError> {
    let config = repo.read_config()?;
    let branch = &config.branch;
    let mut history = repo.read_history(branch)?;

    let (timestamp, id) = match history.iter().next_back() {
        Some((t, i)) => (t.clone(), i.clone()),
        None => return Err(VcsError::NoCommits),
    };

    let commit_dir = repo.layout().commit_dir(branch, &id);
    let commit_file = repo.layout().commit_file(branch, &id);
    let loaded = if commit_dir.is_dir() && commit_file.is_file() {
        match Commit::load(&commit_file) {
            Ok(commit) => Some(commit),
            Err(e) if e.is_corrupt() => None,
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    let commit = match loaded {
        Some(commit) => commit,
        None => {
            // Self-heal: drop the dangling or unparseable entry so the
            // next rollback can reach an intact commit.
            history.remove(&timestamp);
            repo.write_history(branch, &history)?;
            return Err(VcsError::corrupt_commit(&id));
        }
    };

    let backup_dir = if options.backup {
        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let dir = repo.layout().backup_dir().join(format!("backup_{}", stamp));
        backup_commit_files(repo, &commit, &dir)?;
        Some(dir)
    } else {
        None
    };

    let mut index = repo.read_index(branch)?;
    let mut restored = Vec::new();
    let mut missing = Vec::new();

    for key in &commit.files {
        let source = commit_dir.join(key);
        if !source.is_file() {
            missing.push(key.clone());
            continue;
        }
        safe_copy(&source, &repo.layout().working_path(key))?;
        if let Some(entry) = index.get_mut(key) {
            entry.status = crate::types::FileState::Tracked;
        }
        restored.push(key.clone());
    }

    fs::remove_dir_all(&commit_dir)?;
    history.remove(&timestamp);

    repo.write_index(branch, &index)?;
    repo.write_history(branch, &history)?;
    repo.append_log(format!(
        "{} rolled back commit {} on {} branch.",
        config.author, commit.id, branch
    ))?;

    Ok(RollbackReport {
        commit,
        restored,
        missing,
        backup_dir,
    })
}

/// Copy the commit's working-tree files into `dest`. Paths the commit
/// names but the working tree no longer has are skipped.
fn backup_commit_files(
    repo: &Repository,
    commit: &Commit,
    dest: &std::path::Path,
) -> Result<(), VcsError> {
    fs::create_dir_all(dest)?;
    for key in &commit.files {
        let source = repo.layout().working_path(key);
        if source.is_file() {
            safe_copy(&source, &dest.join(key))?;
        }
    }
    Ok(())
}
