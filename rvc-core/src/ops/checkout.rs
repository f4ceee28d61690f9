//! Switch the active branch.

use crate::helpers::copy::safe_copy;
use crate::helpers::store::Repository;
use crate::types::{has_uncommitted, CheckoutOutcome, FileState};
use crate::VcsError;

/// Switch to another branch, restoring its committed files into the
/// working tree.
///
/// When the active index still has uncommitted entries, switching
/// would silently overwrite that work; the caller must pass
/// `force = true` (the confirmation surrogate) or the operation
/// returns `UncommittedChanges` without touching anything.
///
/// # Errors
///
/// * `BranchNotFound` - the target is not registered
pub fn checkout(repo: &Repository, name: &str, force: bool) -> Result<CheckoutOutcome, VcsError> {
    let registry = repo.read_registry()?;
    if !registry.contains(name) {
        return Err(VcsError::branch_not_found(name));
    }

    let mut config = repo.read_config()?;
    if config.branch == name {
        return Ok(CheckoutOutcome::AlreadyActive);
    }

    let current_index = repo.read_index(&config.branch)?;
    if has_uncommitted(&current_index) && !force {
        return Ok(CheckoutOutcome::UncommittedChanges);
    }

    let target_index = repo.read_index(name)?;
    for (key, entry) in &target_index {
        if entry.status != FileState::Committed {
            continue;
        }
        let commit_id = entry
            .last_commit
            .as_deref()
            .ok_or_else(|| VcsError::corrupt(repo.layout().index_path(name)))?;
        let source = repo.layout().commit_dir(name, commit_id).join(key);
        safe_copy(&source, &repo.layout().working_path(key))?;
    }

    config.branch = name.to_string();
    repo.write_config(&config)?;
    repo.append_log(format!("{} switched to branch '{}'.", config.author, name))?;
    Ok(CheckoutOutcome::Switched)
}
