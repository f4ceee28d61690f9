//! RVC error types.
//!
//! Structural and precondition errors abort an operation before any
//! mutation; per-file failures inside batch operations (add, merge)
//! are counted in the operation summaries instead of raised here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for RVC operations.
#[derive(Debug, Error)]
pub enum VcsError {
    /// No control directory found - run init first.
    #[error("repository not initialized - run init first")]
    NotInitialized,

    /// Control directory already exists.
    #[error("repository already initialized")]
    AlreadyInitialized,

    /// A required file or directory is missing.
    #[error("missing: {path}")]
    Missing { path: PathBuf },

    /// A state file exists but could not be parsed.
    #[error("corrupt state file: {path}")]
    Corrupt { path: PathBuf },

    /// Commit was requested with zero tracked entries.
    #[error("no staged changes to commit")]
    NoChanges,

    /// Rollback was requested on a branch with an empty history.
    #[error("no commits to roll back")]
    NoCommits,

    /// Branch creation with a name that is already registered.
    #[error("branch already exists: {name}")]
    BranchExists { name: String },

    /// Named branch is not in the registry.
    #[error("branch not found: {name}")]
    BranchNotFound { name: String },

    /// Operation targets the branch it runs on.
    #[error("branch is already the active branch: {name}")]
    SameBranch { name: String },

    /// Deletion of `main` or the active branch, or merging `main` away.
    #[error("branch is protected: {name}")]
    ProtectedBranch { name: String },

    /// A history entry points at a commit whose data is gone.
    ///
    /// The dangling history entry has already been evicted when this
    /// is returned, so subsequent rollbacks are not blocked.
    #[error("commit {id} data is missing or corrupted")]
    CorruptCommit { id: String },

    /// Profile update with a malformed email address.
    #[error("invalid email format: {email}")]
    InvalidEmail { email: String },

    /// I/O failure outside the per-file batch handling.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VcsError {
    /// Create a "missing" error.
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        VcsError::Missing { path: path.into() }
    }

    /// Create a "corrupt" error.
    pub fn corrupt(path: impl Into<PathBuf>) -> Self {
        VcsError::Corrupt { path: path.into() }
    }

    /// Create a "branch not found" error.
    pub fn branch_not_found(name: impl Into<String>) -> Self {
        VcsError::BranchNotFound { name: name.into() }
    }

    /// Create a "branch exists" error.
    pub fn branch_exists(name: impl Into<String>) -> Self {
        VcsError::BranchExists { name: name.into() }
    }

    /// Create a "protected branch" error.
    pub fn protected(name: impl Into<String>) -> Self {
        VcsError::ProtectedBranch { name: name.into() }
    }

    /// Create a "corrupt commit" error.
    pub fn corrupt_commit(id: impl Into<String>) -> Self {
        VcsError::CorruptCommit { id: id.into() }
    }

    /// Check if this is a Missing error.
    pub fn is_missing(&self) -> bool {
        matches!(self, VcsError::Missing { .. })
    }

    /// Check if this is a Corrupt error.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, VcsError::Corrupt { .. })
    }
}
