//! End-to-end scenarios exercising the engine through the public API.

use rvc_core::{
    checkout, commit, create_branch, delete_branch, history, list_branches, logs, merge,
    rollback, status, update_profile, CheckoutOutcome, MergeOptions, RollbackOptions, VcsError,
};
use rvc_testkit::{TestRepo, TreeSnapshot};

#[test]
fn add_is_idempotent_for_unchanged_content() {
    let repo = TestRepo::new().unwrap();
    repo.write_file("data.txt", b"v1").unwrap();

    let first = repo.add("data.txt").unwrap();
    assert_eq!(first.added, 1);
    assert_eq!(first.skipped, 0);

    let second = repo.add("data.txt").unwrap();
    assert_eq!(second.added, 0);
    assert_eq!(second.skipped, 1);
}

#[test]
fn index_records_content_hash() {
    let repo = TestRepo::new().unwrap();
    repo.write_file("data.txt", b"payload").unwrap();
    repo.add("data.txt").unwrap();

    let index = repo.repo().read_index("main").unwrap();
    let expected = blake3::hash(b"payload").to_hex().to_string();
    assert_eq!(index["data.txt"].hash, expected);
}

#[test]
fn commit_with_empty_stage_is_refused() {
    let repo = TestRepo::new().unwrap();
    let err = commit(repo.repo(), "nothing").unwrap_err();
    assert!(matches!(err, VcsError::NoChanges));
}

#[test]
fn commit_then_rollback_restores_tree_byte_exact() {
    let repo = TestRepo::new().unwrap();
    repo.write_file("a.txt", b"alpha").unwrap();
    repo.write_file("sub/b.txt", b"beta").unwrap();
    repo.add(".").unwrap();
    commit(repo.repo(), "baseline").unwrap();

    let before = TreeSnapshot::capture(&repo).unwrap();

    repo.write_file("a.txt", b"scribbled").unwrap();
    repo.write_file("sub/b.txt", b"also scribbled").unwrap();

    let report = rollback(repo.repo(), RollbackOptions::default()).unwrap();
    assert_eq!(report.restored.len(), 2);
    assert!(report.missing.is_empty());

    let after = TreeSnapshot::capture(&repo).unwrap();
    assert_eq!(before, after);
}

#[test]
fn rollbacks_pop_newest_first() {
    let repo = TestRepo::new().unwrap();
    repo.commit_file("a.txt", b"v1", "first").unwrap();
    repo.commit_file("a.txt", b"v2", "second").unwrap();
    repo.commit_file("a.txt", b"v3", "third").unwrap();

    rollback(repo.repo(), RollbackOptions::default()).unwrap();
    assert_eq!(repo.read_file("a.txt").unwrap(), b"v3");

    rollback(repo.repo(), RollbackOptions::default()).unwrap();
    assert_eq!(repo.read_file("a.txt").unwrap(), b"v2");

    rollback(repo.repo(), RollbackOptions::default()).unwrap();
    assert_eq!(repo.read_file("a.txt").unwrap(), b"v1");

    let err = rollback(repo.repo(), RollbackOptions::default()).unwrap_err();
    assert!(matches!(err, VcsError::NoCommits));
}

#[test]
fn branch_ancestor_stays_frozen_while_branches_diverge() {
    let repo = TestRepo::new().unwrap();
    repo.commit_file("a.txt", b"v1", "base").unwrap();
    create_branch(repo.repo(), "feature").unwrap();

    let ancestor_dir = repo.repo().layout().initial_commit_dir("feature");
    let frozen = TreeSnapshot::capture_root(&ancestor_dir).unwrap();

    // Diverge both branches
    repo.commit_file("a.txt", b"main-v2", "main change").unwrap();
    checkout(repo.repo(), "feature", false).unwrap();
    repo.commit_file("a.txt", b"feature-v2", "feature change").unwrap();

    assert_eq!(TreeSnapshot::capture_root(&ancestor_dir).unwrap(), frozen);
}

#[test]
fn checkout_restores_branch_content() {
    let repo = TestRepo::new().unwrap();
    repo.commit_file("a.txt", b"main-v1", "base").unwrap();
    create_branch(repo.repo(), "feature").unwrap();
    checkout(repo.repo(), "feature", false).unwrap();

    repo.commit_file("a.txt", b"feature-v1", "feature work").unwrap();

    assert_eq!(checkout(repo.repo(), "main", false).unwrap(), CheckoutOutcome::Switched);
    assert_eq!(repo.read_file("a.txt").unwrap(), b"main-v1");

    checkout(repo.repo(), "feature", false).unwrap();
    assert_eq!(repo.read_file("a.txt").unwrap(), b"feature-v1");
}

#[test]
fn merge_fast_path_for_identical_content() {
    let repo = TestRepo::new().unwrap();
    repo.commit_file("a.txt", b"shared", "base").unwrap();
    create_branch(repo.repo(), "feature").unwrap();

    let summary = merge(repo.repo(), "feature", MergeOptions::default()).unwrap();
    assert_eq!(summary.merged, 1);
    assert!(summary.conflicts.is_empty());
    assert_eq!(summary.failed, 0);
    assert_eq!(repo.read_file("a.txt").unwrap(), b"shared");
}

#[test]
fn merge_adopts_files_only_the_source_has() {
    let repo = TestRepo::new().unwrap();
    repo.commit_file("a.txt", b"base", "base").unwrap();
    create_branch(repo.repo(), "feature").unwrap();
    checkout(repo.repo(), "feature", false).unwrap();
    repo.commit_file("new.txt", b"from feature", "add new").unwrap();
    checkout(repo.repo(), "main", false).unwrap();

    let summary = merge(
        repo.repo(),
        "feature",
        MergeOptions { delete_source: true },
    )
    .unwrap();

    assert!(summary.is_clean());
    assert!(summary.source_deleted);
    assert_eq!(repo.read_file("new.txt").unwrap(), b"from feature");
    assert_eq!(list_branches(repo.repo()).unwrap(), vec!["main".to_string()]);

    // The adopted entry is part of main's index now
    let index = repo.repo().read_index("main").unwrap();
    assert!(index.contains_key("new.txt"));
}

#[test]
fn merge_divergent_line_produces_conflict_markers() {
    let repo = TestRepo::new().unwrap();
    repo.commit_file("a.txt", b"A\n", "base").unwrap();
    create_branch(repo.repo(), "feature").unwrap();

    checkout(repo.repo(), "feature", false).unwrap();
    repo.commit_file("a.txt", b"C\n", "theirs").unwrap();

    checkout(repo.repo(), "main", false).unwrap();
    repo.commit_file("a.txt", b"B\n", "ours").unwrap();

    let summary = merge(repo.repo(), "feature", MergeOptions { delete_source: true }).unwrap();
    assert_eq!(summary.conflicts, vec!["a.txt".to_string()]);
    assert!(!summary.is_clean());
    // A conflicted merge never deletes the source branch
    assert!(!summary.source_deleted);
    assert!(list_branches(repo.repo()).unwrap().contains(&"feature".to_string()));

    let merged = String::from_utf8(repo.read_file("a.txt").unwrap()).unwrap();
    assert_eq!(merged, "<<<<<<< CURRENT\nB\n=======\nC\n>>>>>>> MERGE\n");
}

#[test]
fn merge_three_versions_conflicts_only_on_the_changed_line() {
    // v1 on both branches, v2 committed on feature, v3 on main: the
    // single divergent line conflicts, common lines pass through.
    let repo = TestRepo::new().unwrap();
    repo.commit_file("a.txt", b"header\nv1\nfooter\n", "v1").unwrap();
    create_branch(repo.repo(), "feature").unwrap();

    checkout(repo.repo(), "feature", false).unwrap();
    repo.commit_file("a.txt", b"header\nv2\nfooter\n", "v2").unwrap();

    checkout(repo.repo(), "main", false).unwrap();
    repo.commit_file("a.txt", b"header\nv3\nfooter\n", "v3").unwrap();

    let summary = merge(repo.repo(), "feature", MergeOptions::default()).unwrap();
    assert_eq!(summary.conflicts.len(), 1);

    let merged = String::from_utf8(repo.read_file("a.txt").unwrap()).unwrap();
    let lines: Vec<&str> = merged.lines().collect();
    assert_eq!(
        lines,
        vec![
            "header",
            "<<<<<<< CURRENT",
            "v3",
            "=======",
            "v2",
            ">>>>>>> MERGE",
            "footer",
        ]
    );
}

#[test]
fn merge_output_is_deterministic() {
    let build = || {
        let repo = TestRepo::new().unwrap();
        repo.commit_file("a.txt", b"one\ntwo\nthree\n", "base").unwrap();
        create_branch(repo.repo(), "feature").unwrap();
        checkout(repo.repo(), "feature", false).unwrap();
        repo.commit_file("a.txt", b"one\nTWO\nthree\n", "theirs").unwrap();
        checkout(repo.repo(), "main", false).unwrap();
        repo.commit_file("a.txt", b"ONE\ntwo\nthree\n", "ours").unwrap();
        merge(repo.repo(), "feature", MergeOptions::default()).unwrap();
        repo.read_file("a.txt").unwrap()
    };

    assert_eq!(build(), build());
}

#[test]
fn merge_records_a_commit_even_with_conflicts() {
    let repo = TestRepo::new().unwrap();
    repo.commit_file("a.txt", b"A\n", "base").unwrap();
    create_branch(repo.repo(), "feature").unwrap();
    checkout(repo.repo(), "feature", false).unwrap();
    repo.commit_file("a.txt", b"C\n", "theirs").unwrap();
    checkout(repo.repo(), "main", false).unwrap();
    repo.commit_file("a.txt", b"B\n", "ours").unwrap();

    let summary = merge(repo.repo(), "feature", MergeOptions::default()).unwrap();

    let entries = history(repo.repo()).unwrap();
    assert_eq!(entries[0].commit.id, summary.commit_id);
    assert_eq!(entries[0].commit.message, "Merged feature into main.");

    // The index points at the merge commit
    let index = repo.repo().read_index("main").unwrap();
    assert_eq!(index["a.txt"].last_commit.as_deref(), Some(summary.commit_id.as_str()));
}

#[test]
fn merging_main_into_a_branch_is_refused() {
    let repo = TestRepo::new().unwrap();
    create_branch(repo.repo(), "feature").unwrap();
    checkout(repo.repo(), "feature", false).unwrap();

    let err = merge(repo.repo(), "main", MergeOptions::default()).unwrap_err();
    assert!(matches!(err, VcsError::ProtectedBranch { .. }));
}

#[test]
fn merging_the_active_branch_into_itself_is_refused() {
    let repo = TestRepo::new().unwrap();
    create_branch(repo.repo(), "feature").unwrap();
    checkout(repo.repo(), "feature", false).unwrap();

    let err = merge(repo.repo(), "feature", MergeOptions::default()).unwrap_err();
    assert!(matches!(err, VcsError::SameBranch { .. }));
}

#[test]
fn main_branch_cannot_be_deleted() {
    let repo = TestRepo::new().unwrap();
    let err = delete_branch(repo.repo(), "main").unwrap_err();
    assert!(matches!(err, VcsError::ProtectedBranch { .. }));
    assert!(list_branches(repo.repo()).unwrap().contains(&"main".to_string()));
}

#[test]
fn status_reflects_the_full_lifecycle() {
    let repo = TestRepo::new().unwrap();
    repo.write_file("a.txt", b"x").unwrap();

    let report = status(repo.repo()).unwrap();
    assert_eq!(report.untracked, vec!["a.txt".to_string()]);

    repo.add("a.txt").unwrap();
    let report = status(repo.repo()).unwrap();
    assert_eq!(report.staged, vec!["a.txt".to_string()]);
    assert!(report.untracked.is_empty());

    commit(repo.repo(), "first").unwrap();
    let report = status(repo.repo()).unwrap();
    assert_eq!(report.committed, vec!["a.txt".to_string()]);
    assert!(report.staged.is_empty());
}

#[test]
fn profile_identity_flows_into_commits_and_logs() {
    let repo = TestRepo::new().unwrap();
    update_profile(repo.repo(), "Ada", "ada@example.org").unwrap();
    repo.commit_file("a.txt", b"v1", "first").unwrap();

    let entries = history(repo.repo()).unwrap();
    assert_eq!(entries[0].commit.author, "Ada");

    let log = logs(repo.repo()).unwrap();
    assert!(log.values().any(|m| m.contains("Ada committed 1 changes")));
}

#[test]
fn operations_append_to_the_action_log_in_order() {
    let repo = TestRepo::new().unwrap();
    repo.commit_file("a.txt", b"v1", "first").unwrap();
    create_branch(repo.repo(), "feature").unwrap();

    let log = logs(repo.repo()).unwrap();
    let messages: Vec<&String> = log.values().collect();
    assert!(messages[0].contains("initialized"));
    assert!(messages.iter().any(|m| m.contains("committed")));
    assert!(messages.last().unwrap().contains("created the branch 'feature'"));
}
