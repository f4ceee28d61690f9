//! Operation outcome types.
//!
//! Batch operations report per-file failures through counts here
//! instead of aborting; structural errors surface as `VcsError`.

use std::path::PathBuf;

use crate::types::commit::Commit;

/// Result of an `add` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddSummary {
    /// Files newly staged or re-staged with fresh content.
    pub added: usize,
    /// Files already Tracked with an identical hash (idempotent no-op).
    pub skipped: usize,
    /// Files that failed to hash or read; the batch continued.
    pub failed: usize,
}

/// Result of a `commit` operation.
#[derive(Debug, Clone)]
pub struct CommitResult {
    /// Derived commit id.
    pub id: String,
    /// Commit message.
    pub message: String,
    /// Paths captured by the commit.
    pub files: Vec<String>,
}

/// Outcome of a `revert` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertOutcome {
    /// Entry was Tracked and has been removed from the index.
    Reverted,
    /// Caller did not confirm; nothing changed.
    Declined,
    /// Entry is Committed; the only undo path is rollback.
    RequiresRollback,
}

/// Outcome of a `checkout` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Working tree and config now point at the target branch.
    Switched,
    /// Target branch was already active; no-op.
    AlreadyActive,
    /// Active index has uncommitted entries and the caller did not
    /// confirm; nothing changed.
    UncommittedChanges,
}

/// Result of a `merge` operation.
#[derive(Debug, Clone)]
pub struct MergeSummary {
    /// Id of the merge commit.
    pub commit_id: String,
    /// Files merged without conflict (adopted, identical, or resolved).
    pub merged: usize,
    /// Paths requiring manual resolution; their merged content carries
    /// embedded conflict markers and must be edited and re-committed.
    pub conflicts: Vec<String>,
    /// Per-file failures; the batch continued.
    pub failed: usize,
    /// Whether the source branch was deleted after a clean merge.
    pub source_deleted: bool,
}

impl MergeSummary {
    /// True when no file failed and no conflict occurred.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.conflicts.is_empty()
    }
}

/// Result of a `rollback` operation.
#[derive(Debug, Clone)]
pub struct RollbackReport {
    /// Metadata of the undone commit.
    pub commit: Commit,
    /// Paths restored into the working tree (status back to Tracked).
    pub restored: Vec<String>,
    /// Paths named by the commit but missing from its directory.
    pub missing: Vec<String>,
    /// Backup directory, when a backup was requested.
    pub backup_dir: Option<PathBuf>,
}

/// Result of a `status` operation.
#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    /// Tracked (staged, not yet committed) paths.
    pub staged: Vec<String>,
    /// Committed paths.
    pub committed: Vec<String>,
    /// Working-tree files absent from the index.
    pub untracked: Vec<String>,
}

/// One entry of the commit history listing.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Timestamp key from `.history.json`.
    pub timestamp: String,
    /// Commit metadata.
    pub commit: Commit,
}
