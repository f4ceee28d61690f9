//! Typed persistence for repository state.
//!
//! `Repository` is the explicit context passed into every operation:
//! it owns the [`Layout`] and the JSON reads/writes for config, branch
//! indices, the branch registry, per-branch histories, and the action
//! log. Missing state files surface as `Missing`, unparseable ones as
//! `Corrupt`; callers abort before mutating anything else.

use chrono::{SecondsFormat, Utc};
use fs_err as fs;
use std::path::{Path, PathBuf};

use crate::helpers::layout::Layout;
use crate::types::{ActionLog, BranchRegistry, Config, History, Index};
use crate::VcsError;

/// Generate a timestamp map key: RFC 3339 UTC with microseconds, so
/// lexicographic order equals chronological order.
pub fn timestamp_key() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// An opened repository.
#[derive(Debug, Clone)]
pub struct Repository {
    layout: Layout,
}

impl Repository {
    /// Open an initialized repository at `root`.
    ///
    /// # Errors
    ///
    /// * `NotInitialized` - no control directory under `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, VcsError> {
        let layout = Layout::new(root.into());
        if !layout.exists() {
            return Err(VcsError::NotInitialized);
        }
        Ok(Self { layout })
    }

    /// Wrap a root without checking for the control directory.
    ///
    /// Only `init` needs this; everything else goes through [`open`].
    ///
    /// [`open`]: Repository::open
    pub(crate) fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: Layout::new(root.into()),
        }
    }

    /// Get the layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the working-tree root.
    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    /// Read the repository config.
    pub fn read_config(&self) -> Result<Config, VcsError> {
        Config::load(&self.layout.config_path())
    }

    /// Write the repository config.
    pub fn write_config(&self, config: &Config) -> Result<(), VcsError> {
        config.save(&self.layout.config_path())
    }

    /// Name of the active branch, from config.
    pub fn active_branch(&self) -> Result<String, VcsError> {
        Ok(self.read_config()?.branch)
    }

    /// Read the branch registry.
    pub fn read_registry(&self) -> Result<BranchRegistry, VcsError> {
        BranchRegistry::load(&self.layout.registry_path())
    }

    /// Write the branch registry.
    pub fn write_registry(&self, registry: &BranchRegistry) -> Result<(), VcsError> {
        registry.save(&self.layout.registry_path())
    }

    /// Read a branch's staging index.
    pub fn read_index(&self, branch: &str) -> Result<Index, VcsError> {
        let path = self.layout.index_path(branch);
        if !path.exists() {
            return Err(VcsError::missing(path));
        }
        load_json(&path)
    }

    /// Read an index file at an arbitrary path, treating a missing
    /// file as an empty index (used for merge-base snapshots).
    pub fn read_index_at(&self, path: &Path) -> Result<Index, VcsError> {
        if !path.exists() {
            return Ok(Index::new());
        }
        load_json(path)
    }

    /// Write a branch's staging index.
    pub fn write_index(&self, branch: &str, index: &Index) -> Result<(), VcsError> {
        save_json(&self.layout.index_path(branch), index)
    }

    /// Read a branch's commit history; missing file means no commits.
    pub fn read_history(&self, branch: &str) -> Result<History, VcsError> {
        let path = self.layout.history_path(branch);
        if !path.exists() {
            return Ok(History::new());
        }
        load_json(&path)
    }

    /// Write a branch's commit history.
    pub fn write_history(&self, branch: &str, history: &History) -> Result<(), VcsError> {
        save_json(&self.layout.history_path(branch), history)
    }

    /// Read the action log; missing file means an empty log.
    pub fn read_log(&self) -> Result<ActionLog, VcsError> {
        let path = self.layout.logs_path();
        if !path.exists() {
            return Ok(ActionLog::new());
        }
        load_json(&path)
    }

    /// Append one entry to the action log, keyed by the current time.
    pub fn append_log(&self, message: impl Into<String>) -> Result<(), VcsError> {
        let mut log = self.read_log()?;
        log.insert(timestamp_key(), message.into());
        save_json(&self.layout.logs_path(), &log)
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, VcsError> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|_| VcsError::corrupt(path))
}

fn save_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), VcsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
