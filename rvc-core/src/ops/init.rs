//! Repository initialization.

use fs_err as fs;

use crate::helpers::store::{timestamp_key, Repository};
use crate::types::{ActionLog, BranchRegistry, Config, Index};
use crate::VcsError;
use std::path::Path;

/// Initialize a repository in `root`.
///
/// Creates the control directory, the `main` branch with an empty
/// index, the branch registry seeded with `main`, and an initial
/// action-log entry. Each sub-resource is created only if absent, so a
/// partially-completed earlier attempt does not corrupt this one.
///
/// # Errors
///
/// * `AlreadyInitialized` - the control directory already exists
pub fn init(root: &Path) -> Result<Repository, VcsError> {
    let repo = Repository::at(root);
    let layout = repo.layout().clone();

    if layout.exists() {
        return Err(VcsError::AlreadyInitialized);
    }

    fs::create_dir_all(layout.branch_dir(crate::MAIN_BRANCH))?;
    fs::create_dir_all(layout.commits_dir(crate::MAIN_BRANCH))?;

    if !layout.config_path().exists() {
        repo.write_config(&Config::initial())?;
    }

    if !layout.index_path(crate::MAIN_BRANCH).exists() {
        repo.write_index(crate::MAIN_BRANCH, &Index::new())?;
    }

    if !layout.registry_path().exists() {
        repo.write_registry(&BranchRegistry::initial())?;
    }

    if !layout.logs_path().exists() {
        let mut log = ActionLog::new();
        log.insert(timestamp_key(), "Repository initialized".to_string());
        let json = serde_json::to_string_pretty(&log)?;
        fs::write(layout.logs_path(), json)?;
    }

    Ok(repo)
}
