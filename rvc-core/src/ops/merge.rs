//! Three-way branch merge.
//!
//! The ancestor is the source branch's `commits/initialCommit/`
//! snapshot, frozen at branch-creation time. File-level classification
//! follows the union of the three indices; line-level resolution is a
//! naive positional three-way merge, not an LCS diff: insertions and
//! deletions that shift line numbers will mis-align later lines and
//! produce spurious conflicts. That behavior is deliberate and must
//! not be silently upgraded - downstream tooling depends on the exact
//! marker output.

use fs_err as fs;
use std::collections::BTreeSet;
use std::path::Path;

use crate::helpers::copy::safe_copy;
use crate::helpers::hash::{hash_bytes, hash_file};
use crate::helpers::store::{timestamp_key, Repository};
use crate::helpers::text::is_text_file;
use crate::ops::branch;
use crate::types::{Commit, FileState, Index, MergeSummary};
use crate::VcsError;

/// Marker opening a conflict block (the active branch's line follows).
pub const CONFLICT_OURS: &str = "<<<<<<< CURRENT";

/// Marker separating the two conflicting lines.
pub const CONFLICT_SEP: &str = "=======";

/// Marker closing a conflict block (the source branch's line precedes).
pub const CONFLICT_THEIRS: &str = ">>>>>>> MERGE";

/// Merge options.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Delete the source branch after a merge with zero conflicts and
    /// zero failures (the confirmation surrogate for the "delete
    /// merged branch?" prompt).
    pub delete_source: bool,
}

/// Per-file resolution result.
enum Resolution {
    Merged,
    Conflicted,
    Failed,
}

/// Merge `source` into the active branch.
///
/// A merge commit (message `"Merged <source> into <target>."`) is
/// always recorded, even when conflicts remain; conflicted files carry
/// embedded markers in the working tree and need an edit plus a
/// re-commit. Per-file failures are counted, not raised.
///
/// # Errors
///
/// * `ProtectedBranch` - `source` is `main`
/// * `BranchNotFound` - `source` is not registered
/// * `SameBranch` - `source` is the active branch
pub fn merge(
    repo: &Repository,
    source: &str,
    options: MergeOptions,
) -> Result<MergeSummary, VcsError> {
    if source == crate::MAIN_BRANCH {
        return Err(VcsError::protected(source));
    }

    let registry = repo.read_registry()?;
    if !registry.contains(source) {
        return Err(VcsError::branch_not_found(source));
    }

    let config = repo.read_config()?;
    let target = config.branch.clone();
    if target == source {
        return Err(VcsError::SameBranch {
            name: source.to_string(),
        });
    }

    let ours = repo.read_index(&target)?;
    let theirs = repo.read_index(source)?;
    let ancestor_dir = repo.layout().initial_commit_dir(source);
    let ancestor = repo.read_index_at(&ancestor_dir.join(crate::helpers::layout::INDEX_FILE))?;

    let message = format!("Merged {} into {}.", source, target);
    let timestamp = timestamp_key();
    let id = hash_bytes(format!("{} {} {}", config.author, message, timestamp).as_bytes());
    let merge_dir = repo.layout().commit_dir(&target, &id);
    fs::create_dir_all(&merge_dir)?;

    let mut merged_index = ours.clone();
    let mut files_list = Vec::new();
    let mut merged_count = 0usize;
    let mut failed_count = 0usize;
    let mut conflicts = Vec::new();

    let keys: BTreeSet<&String> = ancestor.keys().chain(ours.keys()).chain(theirs.keys()).collect();

    for key in keys {
        let in_ours = ours.get(key);
        let in_theirs = theirs.get(key);

        let resolution = match (in_ours, in_theirs) {
            // Only we have it: nothing to merge, keep ours unchanged.
            (Some(_), None) => continue,
            (None, Some(their_entry)) => {
                match branch_file(repo, source, their_entry, key) {
                    Some(their_file) if their_file.exists() => {
                        match safe_copy(&their_file, &merge_dir.join(key)) {
                            Ok(()) => {
                                merged_index.insert(key.clone(), their_entry.clone());
                                Resolution::Merged
                            }
                            Err(_) => Resolution::Failed,
                        }
                    }
                    _ => Resolution::Failed,
                }
            }
            (Some(our_entry), Some(their_entry)) if our_entry.hash == their_entry.hash => {
                // No real change on either side; keep ours.
                match branch_file(repo, &target, our_entry, key) {
                    Some(our_file) if our_file.exists() => {
                        match safe_copy(&our_file, &merge_dir.join(key)) {
                            Ok(()) => Resolution::Merged,
                            Err(_) => Resolution::Failed,
                        }
                    }
                    _ => Resolution::Failed,
                }
            }
            (Some(our_entry), Some(their_entry)) => {
                match ancestor.get(key) {
                    Some(anc_entry) => {
                        let anc_file = anc_entry
                            .last_commit
                            .as_deref()
                            .map(|c| ancestor_dir.join("commits").join(c).join(key));
                        let our_file = branch_file(repo, &target, our_entry, key);
                        let their_file = branch_file(repo, source, their_entry, key);
                        match (anc_file, our_file, their_file) {
                            (Some(a), Some(o), Some(t)) => {
                                resolve_conflict(&a, &o, &t, &merge_dir.join(key))
                            }
                            _ => Resolution::Failed,
                        }
                    }
                    // Divergent with no ancestor: nothing to reconcile
                    // against; counted as a failure, ours kept.
                    None => Resolution::Failed,
                }
            }
            (None, None) => continue,
        };

        match resolution {
            Resolution::Failed => {
                failed_count += 1;
                continue;
            }
            Resolution::Conflicted => conflicts.push(key.clone()),
            Resolution::Merged => merged_count += 1,
        }

        // Re-point the surviving entry at the merge commit.
        let final_file = merge_dir.join(key);
        match (hash_file(&final_file), merged_index.get_mut(key)) {
            (Ok(new_hash), Some(entry)) => {
                entry.hash = new_hash;
                entry.last_commit = Some(id.clone());
                files_list.push(key.clone());
            }
            _ => failed_count += 1,
        }
    }

    let commit = Commit {
        id: id.clone(),
        message: message.clone(),
        author: config.author.clone(),
        timestamp: timestamp.clone(),
        files: files_list,
    };
    commit.save(&repo.layout().commit_file(&target, &id))?;

    let mut history = repo.read_history(&target)?;
    history.insert(timestamp, id.clone());
    repo.write_history(&target, &history)?;

    sync_working_tree(repo, &target, &merged_index)?;
    repo.write_index(&target, &merged_index)?;
    repo.append_log(format!("{} by {}.", message, config.author))?;

    let mut summary = MergeSummary {
        commit_id: id,
        merged: merged_count,
        conflicts,
        failed: failed_count,
        source_deleted: false,
    };

    if summary.is_clean() && options.delete_source {
        branch::delete(repo, source)?;
        summary.source_deleted = true;
    }

    Ok(summary)
}

/// Committed content of `key` as stored under a branch's commits.
fn branch_file(
    repo: &Repository,
    branch: &str,
    entry: &crate::types::IndexEntry,
    key: &str,
) -> Option<std::path::PathBuf> {
    entry
        .last_commit
        .as_deref()
        .map(|c| repo.layout().commit_dir(branch, c).join(key))
}

/// Merge one file's content into `final_file`.
///
/// Non-text input on any side is not merged: theirs wins verbatim and
/// the file counts as merged without true resolution.
fn resolve_conflict(
    ancestor: &Path,
    ours: &Path,
    theirs: &Path,
    final_file: &Path,
) -> Resolution {
    if !is_text_file(ancestor) || !is_text_file(ours) || !is_text_file(theirs) {
        return match safe_copy(theirs, final_file) {
            Ok(()) => Resolution::Merged,
            Err(_) => Resolution::Failed,
        };
    }

    let (a, o, t) = match (read_lines(ancestor), read_lines(ours), read_lines(theirs)) {
        (Ok(a), Ok(o), Ok(t)) => (a, o, t),
        _ => return Resolution::Failed,
    };

    let (lines, conflicted) = merge_lines(&a, &o, &t);

    if let Some(parent) = final_file.parent() {
        if fs::create_dir_all(parent).is_err() {
            return Resolution::Failed;
        }
    }
    let mut out = String::new();
    for line in &lines {
        out.push_str(line);
        out.push('\n');
    }
    if fs::write(final_file, out).is_err() {
        return Resolution::Failed;
    }

    if conflicted {
        Resolution::Conflicted
    } else {
        Resolution::Merged
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, VcsError> {
    Ok(fs::read_to_string(path)?.lines().map(String::from).collect())
}

/// Positional line-indexed three-way merge.
///
/// For every index up to the longest input (missing lines read as
/// empty): equal ours/theirs wins; otherwise the side that changed
/// relative to the ancestor wins; when both changed, a conflict block
/// with both lines is emitted.
fn merge_lines(ancestor: &[String], ours: &[String], theirs: &[String]) -> (Vec<String>, bool) {
    let max_lines = ancestor.len().max(ours.len()).max(theirs.len());
    let mut result = Vec::with_capacity(max_lines);
    let mut conflicted = false;

    for i in 0..max_lines {
        let a = ancestor.get(i).map(String::as_str).unwrap_or("");
        let o = ours.get(i).map(String::as_str).unwrap_or("");
        let t = theirs.get(i).map(String::as_str).unwrap_or("");

        if o == t {
            result.push(o.to_string());
        } else if a == o {
            result.push(t.to_string());
        } else if a == t {
            result.push(o.to_string());
        } else {
            conflicted = true;
            result.push(CONFLICT_OURS.to_string());
            result.push(o.to_string());
            result.push(CONFLICT_SEP.to_string());
            result.push(t.to_string());
            result.push(CONFLICT_THEIRS.to_string());
        }
    }

    (result, conflicted)
}

/// Copy every Committed entry's content into the working tree.
fn sync_working_tree(repo: &Repository, branch: &str, index: &Index) -> Result<(), VcsError> {
    for (key, entry) in index {
        if entry.status != FileState::Committed {
            continue;
        }
        if let Some(commit_id) = entry.last_commit.as_deref() {
            let source = repo.layout().commit_dir(branch, commit_id).join(key);
            if source.exists() {
                safe_copy(&source, &repo.layout().working_path(key))?;
            }
        }
    }
    Ok(())
}
