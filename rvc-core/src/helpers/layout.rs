//! On-disk layout helpers for the `.rvc/` control directory.
//!
//! The control directory contains:
//! - `config.json` - author, email, active branch
//! - `.logs.json` - append-only action log
//! - `branches/branches.json` - branch registry
//! - `branches/<name>/index.json` - per-branch staging index
//! - `branches/<name>/commits/<id>/` - file copies + `commit.json`
//! - `branches/<name>/commits/.history.json` - timestamp -> commit id
//! - `branches/<name>/commits/initialCommit/` - merge-base snapshot
//! - `backup/backup_<timestamp>/` - rollback safety copies

use std::path::{Path, PathBuf};

/// The control directory name.
pub const CONTROL_DIR: &str = ".rvc";

/// Commit metadata file name.
pub const COMMIT_FILE: &str = "commit.json";

/// Per-branch index file name.
pub const INDEX_FILE: &str = "index.json";

/// Per-branch history file name.
pub const HISTORY_FILE: &str = ".history.json";

/// Directory name of the frozen branch-creation snapshot.
pub const INITIAL_COMMIT_DIR: &str = "initialCommit";

/// Layout helper for a repository rooted at a working directory.
///
/// This is the explicit repository context: every operation receives
/// it instead of reading ambient process state.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Working-tree root.
    root: PathBuf,
}

impl Layout {
    /// Create a layout for a repository root.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the working-tree root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the control directory (`<root>/.rvc`).
    pub fn control_dir(&self) -> PathBuf {
        self.root.join(CONTROL_DIR)
    }

    /// Get the config file path (`.rvc/config.json`).
    pub fn config_path(&self) -> PathBuf {
        self.control_dir().join("config.json")
    }

    /// Get the action log path (`.rvc/.logs.json`).
    pub fn logs_path(&self) -> PathBuf {
        self.control_dir().join(".logs.json")
    }

    /// Get the branches directory (`.rvc/branches`).
    pub fn branches_dir(&self) -> PathBuf {
        self.control_dir().join("branches")
    }

    /// Get the branch registry path (`.rvc/branches/branches.json`).
    pub fn registry_path(&self) -> PathBuf {
        self.branches_dir().join("branches.json")
    }

    /// Get a branch directory.
    pub fn branch_dir(&self, branch: &str) -> PathBuf {
        self.branches_dir().join(branch)
    }

    /// Get a branch's index file.
    pub fn index_path(&self, branch: &str) -> PathBuf {
        self.branch_dir(branch).join(INDEX_FILE)
    }

    /// Get a branch's commits directory.
    pub fn commits_dir(&self, branch: &str) -> PathBuf {
        self.branch_dir(branch).join("commits")
    }

    /// Get a commit directory inside a branch.
    pub fn commit_dir(&self, branch: &str, commit_id: &str) -> PathBuf {
        self.commits_dir(branch).join(commit_id)
    }

    /// Get a commit's metadata file.
    pub fn commit_file(&self, branch: &str, commit_id: &str) -> PathBuf {
        self.commit_dir(branch, commit_id).join(COMMIT_FILE)
    }

    /// Get a branch's history file.
    pub fn history_path(&self, branch: &str) -> PathBuf {
        self.commits_dir(branch).join(HISTORY_FILE)
    }

    /// Get a branch's frozen merge-base snapshot directory.
    pub fn initial_commit_dir(&self, branch: &str) -> PathBuf {
        self.commits_dir(branch).join(INITIAL_COMMIT_DIR)
    }

    /// Get the backup directory (`.rvc/backup`).
    pub fn backup_dir(&self) -> PathBuf {
        self.control_dir().join("backup")
    }

    /// Check if the control directory exists.
    pub fn exists(&self) -> bool {
        self.control_dir().exists()
    }

    /// Resolve a repo-relative index key to a working-tree path.
    pub fn working_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = Layout::new(PathBuf::from("/repo"));

        assert_eq!(layout.control_dir(), PathBuf::from("/repo/.rvc"));
        assert_eq!(layout.config_path(), PathBuf::from("/repo/.rvc/config.json"));
        assert_eq!(layout.logs_path(), PathBuf::from("/repo/.rvc/.logs.json"));
        assert_eq!(
            layout.registry_path(),
            PathBuf::from("/repo/.rvc/branches/branches.json")
        );
        assert_eq!(
            layout.index_path("main"),
            PathBuf::from("/repo/.rvc/branches/main/index.json")
        );
        assert_eq!(
            layout.commit_file("main", "abc"),
            PathBuf::from("/repo/.rvc/branches/main/commits/abc/commit.json")
        );
        assert_eq!(
            layout.history_path("main"),
            PathBuf::from("/repo/.rvc/branches/main/commits/.history.json")
        );
        assert_eq!(
            layout.initial_commit_dir("feature"),
            PathBuf::from("/repo/.rvc/branches/feature/commits/initialCommit")
        );
    }

    #[test]
    fn test_working_path() {
        let layout = Layout::new(PathBuf::from("/repo"));
        assert_eq!(layout.working_path("dir/a.txt"), PathBuf::from("/repo/dir/a.txt"));
    }
}
