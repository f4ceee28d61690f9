//! Test repository utilities.

use fs_err as fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use rvc_core::{Repository, VcsError};

/// A temporary initialized repository.
///
/// The backing directory is cleaned up when dropped.
pub struct TestRepo {
    /// Temporary directory containing the repo.
    _temp: TempDir,
    root: PathBuf,
    repo: Repository,
}

impl TestRepo {
    /// Create and initialize a repository in a fresh temp directory.
    pub fn new() -> Result<Self, VcsError> {
        let temp = TempDir::new()?;
        let root = temp.path().to_path_buf();
        let repo = rvc_core::init(&root)?;
        Ok(Self {
            _temp: temp,
            root,
            repo,
        })
    }

    /// Get the repository root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the opened repository handle.
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Write a file into the working tree, creating parents.
    pub fn write_file(&self, rel_path: &str, contents: &[u8]) -> Result<PathBuf, VcsError> {
        let path = self.root.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Read a working-tree file.
    pub fn read_file(&self, rel_path: &str) -> Result<Vec<u8>, VcsError> {
        Ok(fs::read(self.root.join(rel_path))?)
    }

    /// Check if a working-tree file exists.
    pub fn file_exists(&self, rel_path: &str) -> bool {
        self.root.join(rel_path).exists()
    }

    /// Get the absolute path for a relative path.
    pub fn path(&self, rel_path: &str) -> PathBuf {
        self.root.join(rel_path)
    }

    /// Stage a path, shorthand over [`rvc_core::add`].
    pub fn add(&self, rel_path: &str) -> Result<rvc_core::AddSummary, VcsError> {
        rvc_core::add(&self.repo, Path::new(rel_path))
    }

    /// Write, stage, and commit a file in one step.
    pub fn commit_file(
        &self,
        rel_path: &str,
        contents: &[u8],
        message: &str,
    ) -> Result<rvc_core::CommitResult, VcsError> {
        self.write_file(rel_path, contents)?;
        self.add(rel_path)?;
        rvc_core::commit(&self.repo, message)
    }
}
