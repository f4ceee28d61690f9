//! Repository configuration, stored in `.rvc/config.json`.

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::VcsError;

/// Default author name for a fresh repository.
pub const DEFAULT_AUTHOR: &str = "guest";

/// Placeholder for an unset email.
pub const UNKNOWN: &str = "unknown";

/// Repository configuration: commit identity plus the active branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Author name recorded in commit metadata.
    pub author: String,

    /// Author email.
    pub email: String,

    /// Name of the active branch.
    pub branch: String,
}

impl Config {
    /// Configuration for a freshly initialized repository.
    pub fn initial() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            email: UNKNOWN.to_string(),
            branch: crate::MAIN_BRANCH.to_string(),
        }
    }

    /// Load configuration from a JSON file.
    ///
    /// A missing file is `Missing`, an unparseable one `Corrupt`.
    pub fn load(path: &Path) -> Result<Self, VcsError> {
        if !path.exists() {
            return Err(VcsError::missing(path));
        }
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|_| VcsError::corrupt(path))
    }

    /// Save configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), VcsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
