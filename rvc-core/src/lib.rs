//! RVC Core Library
//!
//! Pure Rust implementation of a local version-control engine:
//! content-hashed staging, per-branch commit snapshots, three-way
//! merge with conflict markers, and LIFO rollback. All state lives
//! under a `.rvc/` directory at the repository root as pretty-printed
//! JSON, so every artifact can be inspected and repaired by hand.
//!
//! # Architecture
//!
//! - `types`: Core data types (Config, Index, Commit, errors, outcomes)
//! - `ops`: High-level operations (init, add, commit, merge, rollback, ...)
//! - `helpers`: Low-level utilities (hashing, layout, JSON store, copying)
//! - `remote`: Collaborator interfaces for out-of-process synchronization
//!
//! # Concurrency
//!
//! The engine assumes a single writer. There is no lock file; two
//! processes mutating the same repository concurrently can interleave
//! read-modify-write cycles and lose updates. Callers that need
//! cross-process safety must serialize externally.

pub mod helpers;
pub mod ops;
pub mod remote;
pub mod types;

/// The default branch, created by `init` and protected from deletion
/// and from being a merge source.
pub const MAIN_BRANCH: &str = "main";

// Re-export commonly used types at crate root
pub use types::{
    ActionLog, AddSummary, BranchRegistry, CheckoutOutcome, Commit, CommitResult, Config,
    FileState, History, HistoryEntry, Index, IndexEntry, MergeSummary, RevertOutcome,
    RollbackReport, StatusReport, VcsError,
};

// Re-export operations at crate root
pub use ops::add::add;
pub use ops::branch::{create as create_branch, delete as delete_branch, list as list_branches};
pub use ops::checkout::checkout;
pub use ops::commit::commit;
pub use ops::init::init;
pub use ops::log::{history, logs};
pub use ops::merge::{merge, MergeOptions};
pub use ops::profile::{profile, update_profile};
pub use ops::revert::revert;
pub use ops::rollback::{rollback, RollbackOptions};
pub use ops::status::status;

// Re-export the store handle and layout for callers and tests
pub use helpers::layout::Layout;
pub use helpers::store::Repository;

// Re-export remote seams
pub use remote::{BlobStore, LocalBlobStore, SecretCipher};
