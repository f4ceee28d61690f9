//! Per-branch staging index, stored in `branches/<name>/index.json`.
//!
//! The index maps repo-relative paths to tracking metadata. Paths are
//! stored as forward-slash strings so the JSON schema is stable across
//! platforms.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Tracking state of an index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileState {
    /// Staged: content hashed, not yet part of a commit.
    Tracked,
    /// Captured by a commit; `last_commit` names it.
    Committed,
}

/// A single tracked path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Content hash of the working-tree file at add time.
    pub hash: String,

    /// Tracking state.
    pub status: FileState,

    /// Id of the commit that captured this path.
    ///
    /// Invariant: always present when `status` is `Committed`, and the
    /// referenced commit directory contains the path.
    #[serde(rename = "lastCommit", default, skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<String>,
}

impl IndexEntry {
    /// A freshly staged entry.
    pub fn tracked(hash: String) -> Self {
        Self {
            hash,
            status: FileState::Tracked,
            last_commit: None,
        }
    }

    /// Promote this entry to Committed under the given commit id.
    pub fn commit(&mut self, commit_id: &str) {
        self.status = FileState::Committed;
        self.last_commit = Some(commit_id.to_string());
    }
}

/// Index map: repo-relative path -> entry. `BTreeMap` keeps the JSON
/// output deterministic.
pub type Index = BTreeMap<String, IndexEntry>;

/// Convert a repo-relative path to its index key.
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// True if any entry is not yet Committed.
pub fn has_uncommitted(index: &Index) -> bool {
    index.values().any(|e| e.status != FileState::Committed)
}
