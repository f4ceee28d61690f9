//! Repository operations.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod profile;
pub mod revert;
pub mod rollback;
pub mod status;
