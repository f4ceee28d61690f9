//! Working-tree snapshot capture for comparison tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use rvc_core::VcsError;

use crate::repo::TestRepo;

/// A content snapshot of a working tree: repo-relative path to content
/// hash, with everything under the control directory excluded.
///
/// Two snapshots compare equal exactly when every file outside `.rvc/`
/// has identical bytes, which is what round-trip and determinism tests
/// assert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeSnapshot {
    /// Relative path -> content hash.
    pub files: BTreeMap<String, String>,
}

impl TreeSnapshot {
    /// Capture the current working tree of a test repository.
    pub fn capture(repo: &TestRepo) -> Result<Self, VcsError> {
        Self::capture_root(repo.root())
    }

    /// Capture any directory as a snapshot.
    pub fn capture_root(root: &Path) -> Result<Self, VcsError> {
        let mut files = BTreeMap::new();
        for entry in walkdir::WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| e.file_name() != ".rvc")
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(|_| VcsError::corrupt(entry.path()))?;
            let key = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.insert(key, rvc_core::helpers::hash::hash_file(entry.path())?);
        }
        Ok(Self { files })
    }

    /// Number of captured files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the tree held no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Hash of one file, if captured.
    pub fn hash_of(&self, rel_path: &str) -> Option<&str> {
        self.files.get(rel_path).map(String::as_str)
    }

    /// Persist a snapshot as JSON, for baseline comparisons.
    pub fn save(&self, path: &Path) -> Result<(), VcsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs_err::write(path, json)?;
        Ok(())
    }

    /// Load a previously saved snapshot.
    pub fn load(path: &Path) -> Result<Self, VcsError> {
        let contents = fs_err::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|_| VcsError::corrupt(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_skips_control_dir() {
        let repo = TestRepo::new().unwrap();
        repo.write_file("a.txt", b"x").unwrap();

        let snapshot = TreeSnapshot::capture(&repo).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.hash_of("a.txt").is_some());
        assert!(!snapshot.files.keys().any(|k| k.contains(".rvc")));
    }

    #[test]
    fn test_equal_content_equal_snapshot() {
        let a = TestRepo::new().unwrap();
        let b = TestRepo::new().unwrap();
        a.write_file("x.txt", b"same").unwrap();
        b.write_file("x.txt", b"same").unwrap();

        assert_eq!(TreeSnapshot::capture(&a).unwrap(), TreeSnapshot::capture(&b).unwrap());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let repo = TestRepo::new().unwrap();
        repo.write_file("x.txt", b"v1").unwrap();
        let snapshot = TreeSnapshot::capture(&repo).unwrap();

        let file = repo.root().join("snapshot.json");
        snapshot.save(&file).unwrap();
        // The saved file itself is not part of the captured state
        assert_eq!(TreeSnapshot::load(&file).unwrap(), snapshot);
    }

    #[test]
    fn test_content_change_changes_snapshot() {
        let repo = TestRepo::new().unwrap();
        repo.write_file("x.txt", b"v1").unwrap();
        let before = TreeSnapshot::capture(&repo).unwrap();

        repo.write_file("x.txt", b"v2").unwrap();
        let after = TreeSnapshot::capture(&repo).unwrap();
        assert_ne!(before, after);
    }
}
