//! Branch registry, stored in `branches/branches.json`.

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::VcsError;

/// The set of registered branch names.
///
/// Invariant: always contains `"main"`; `"main"` is never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRegistry {
    /// Registered branch names.
    pub branches: BTreeSet<String>,
}

impl BranchRegistry {
    /// Registry for a fresh repository: just `main`.
    pub fn initial() -> Self {
        let mut branches = BTreeSet::new();
        branches.insert(crate::MAIN_BRANCH.to_string());
        Self { branches }
    }

    /// Check whether a branch is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.branches.contains(name)
    }

    /// Register a branch; false if it already existed.
    pub fn add(&mut self, name: &str) -> bool {
        self.branches.insert(name.to_string())
    }

    /// Unregister a branch; false if it was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.branches.remove(name)
    }

    /// Load the registry from a JSON file.
    pub fn load(path: &Path) -> Result<Self, VcsError> {
        if !path.exists() {
            return Err(VcsError::missing(path));
        }
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|_| VcsError::corrupt(path))
    }

    /// Save the registry as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), VcsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
