//! Unstage a tracked file.

use std::path::Path;

use crate::helpers::store::Repository;
use crate::types::{path_key, FileState, RevertOutcome};
use crate::VcsError;

/// Remove a Tracked entry from the active branch's index.
///
/// `confirmed` stands in for the interactive y/n prompt; pass `false`
/// to get a `Declined` no-op. Committed entries are refused - the only
/// undo path for a committed file is rollback.
///
/// # Errors
///
/// * `Missing` - the path is not in the index
pub fn revert(repo: &Repository, path: &Path, confirmed: bool) -> Result<RevertOutcome, VcsError> {
    if !confirmed {
        return Ok(RevertOutcome::Declined);
    }

    let branch = repo.active_branch()?;
    let mut index = repo.read_index(&branch)?;
    let key = path_key(path);

    let entry = index.get(&key).ok_or_else(|| VcsError::missing(path))?;

    match entry.status {
        FileState::Committed => Ok(RevertOutcome::RequiresRollback),
        FileState::Tracked => {
            index.remove(&key);
            repo.write_index(&branch, &index)?;
            Ok(RevertOutcome::Reverted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::add::add;
    use crate::ops::commit::commit;
    use crate::ops::init::init;
    use fs_err as fs;

    #[test]
    fn test_revert_tracked() {
        let temp = tempfile::tempdir().unwrap();
        let repo = init(temp.path()).unwrap();
        fs::write(temp.path().join("a.txt"), b"v1").unwrap();
        add(&repo, Path::new("a.txt")).unwrap();

        let outcome = revert(&repo, Path::new("a.txt"), true).unwrap();
        assert_eq!(outcome, RevertOutcome::Reverted);
        assert!(!repo.read_index("main").unwrap().contains_key("a.txt"));
    }

    #[test]
    fn test_revert_declined() {
        let temp = tempfile::tempdir().unwrap();
        let repo = init(temp.path()).unwrap();
        fs::write(temp.path().join("a.txt"), b"v1").unwrap();
        add(&repo, Path::new("a.txt")).unwrap();

        let outcome = revert(&repo, Path::new("a.txt"), false).unwrap();
        assert_eq!(outcome, RevertOutcome::Declined);
        assert!(repo.read_index("main").unwrap().contains_key("a.txt"));
    }

    #[test]
    fn test_revert_committed_refused() {
        let temp = tempfile::tempdir().unwrap();
        let repo = init(temp.path()).unwrap();
        fs::write(temp.path().join("a.txt"), b"v1").unwrap();
        add(&repo, Path::new("a.txt")).unwrap();
        commit(&repo, "first").unwrap();

        let outcome = revert(&repo, Path::new("a.txt"), true).unwrap();
        assert_eq!(outcome, RevertOutcome::RequiresRollback);
        assert!(repo.read_index("main").unwrap().contains_key("a.txt"));
    }

    #[test]
    fn test_revert_unknown_path() {
        let temp = tempfile::tempdir().unwrap();
        let repo = init(temp.path()).unwrap();
        let err = revert(&repo, Path::new("ghost.txt"), true).unwrap_err();
        assert!(err.is_missing());
    }
}
