//! Core type definitions for RVC.

mod commit;
mod config;
mod error;
mod index;
mod outcome;
mod registry;

pub use commit::{ActionLog, Commit, History};
pub use config::Config;
pub use error::VcsError;
pub use index::{has_uncommitted, path_key, FileState, Index, IndexEntry};
pub use outcome::{
    AddSummary, CheckoutOutcome, CommitResult, HistoryEntry, MergeSummary, RevertOutcome,
    RollbackReport, StatusReport,
};
pub use registry::BranchRegistry;
