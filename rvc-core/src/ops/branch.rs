//! Branch creation, listing, and deletion.

use fs_err as fs;

use crate::helpers::copy::copy_tree;
use crate::helpers::store::Repository;
use crate::VcsError;

/// Create a branch from the active branch's current state.
///
/// Every file under the source branch directory (index, commits) is
/// copied into the new branch directory and, a second time, into the
/// new branch's `commits/initialCommit/` - the frozen snapshot later
/// used as the three-way merge ancestor. If the copy fails, the
/// partially-created branch directory is removed and the registry is
/// left untouched.
///
/// # Errors
///
/// * `BranchExists` - the name is already registered
pub fn create(repo: &Repository, name: &str) -> Result<(), VcsError> {
    let mut registry = repo.read_registry()?;
    if registry.contains(name) {
        return Err(VcsError::branch_exists(name));
    }

    let config = repo.read_config()?;
    let source_dir = repo.layout().branch_dir(&config.branch);
    let branch_dir = repo.layout().branch_dir(name);

    fs::create_dir_all(&branch_dir)?;

    let snapshot = copy_tree(&source_dir, &branch_dir)
        .and_then(|_| copy_tree(&source_dir, &repo.layout().initial_commit_dir(name)));
    if let Err(e) = snapshot {
        let _ = fs::remove_dir_all(&branch_dir);
        return Err(e);
    }

    registry.add(name);
    repo.write_registry(&registry)?;
    repo.append_log(format!("{} created the branch '{}'.", config.author, name))?;
    Ok(())
}

/// Registered branch names.
pub fn list(repo: &Repository) -> Result<Vec<String>, VcsError> {
    Ok(repo.read_registry()?.branches.iter().cloned().collect())
}

/// Delete a branch: its directory and its registry entry.
///
/// # Errors
///
/// * `ProtectedBranch` - the active branch, or `main`
/// * `BranchNotFound` - the name is not registered
pub fn delete(repo: &Repository, name: &str) -> Result<(), VcsError> {
    let config = repo.read_config()?;
    if name == config.branch || name == crate::MAIN_BRANCH {
        return Err(VcsError::protected(name));
    }

    let mut registry = repo.read_registry()?;
    if !registry.contains(name) {
        return Err(VcsError::branch_not_found(name));
    }

    let branch_dir = repo.layout().branch_dir(name);
    if branch_dir.exists() {
        fs::remove_dir_all(&branch_dir)?;
    }

    registry.remove(name);
    repo.write_registry(&registry)?;
    repo.append_log(format!("{} deleted the branch '{}'.", config.author, name))?;
    Ok(())
}
