//! Commit metadata (`commit.json`) and per-branch history.

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::VcsError;

/// Commit metadata written alongside the captured files.
///
/// Immutable once created; deleted only by rollback of this exact
/// commit or by deleting the owning branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit id: digest of `"{author} {message} {timestamp}"`.
    pub id: String,

    /// Commit message.
    pub message: String,

    /// Author name at commit time.
    pub author: String,

    /// Creation instant, RFC 3339 UTC.
    pub timestamp: String,

    /// Repo-relative paths captured by this commit.
    pub files: Vec<String>,
}

impl Commit {
    /// Load commit metadata from a `commit.json` file.
    pub fn load(path: &Path) -> Result<Self, VcsError> {
        if !path.exists() {
            return Err(VcsError::missing(path));
        }
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|_| VcsError::corrupt(path))
    }

    /// Save commit metadata as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), VcsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Per-branch commit history: timestamp key -> commit id.
///
/// Keys are RFC 3339 UTC strings, so `BTreeMap` order is chronological
/// and the last entry is always the most recent commit (rollback pops
/// exactly that one).
pub type History = BTreeMap<String, String>;

/// The action log: timestamp key -> human-readable description.
pub type ActionLog = BTreeMap<String, String>;
