//! RVC Test Kit - end-to-end testing utilities.
//!
//! # Key Types
//!
//! - [`TestRepo`]: Creates a temporary, initialized repository
//! - [`TreeSnapshot`]: Captures working-tree content for comparison
//!
//! # Example
//!
//! ```no_run
//! use rvc_testkit::{TestRepo, TreeSnapshot};
//!
//! let repo = TestRepo::new().unwrap();
//! repo.commit_file("data.csv", b"a,b,c\n", "import").unwrap();
//! let snapshot = TreeSnapshot::capture(&repo).unwrap();
//! assert_eq!(snapshot.len(), 1);
//! ```

mod repo;
mod snapshot;

pub use repo::TestRepo;
pub use snapshot::TreeSnapshot;

/// Re-export rvc_core for convenience in tests.
pub use rvc_core;
