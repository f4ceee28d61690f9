//! Collaborator interfaces for remote synchronization.
//!
//! Push/pull transport is out of scope for the engine; these traits
//! are the seams a sync layer plugs into. `LocalBlobStore` is the
//! filesystem implementation used by the tests and by same-machine
//! "remotes".

use fs_err as fs;
use std::path::PathBuf;

use crate::VcsError;

/// Flat-namespace blob storage, addressed by container and object key.
pub trait BlobStore: Send + Sync {
    /// Store an object, overwriting any existing one with the key.
    fn put_object(&self, container: &str, key: &str, data: &[u8]) -> Result<(), VcsError>;

    /// Fetch an object's bytes.
    fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>, VcsError>;

    /// Keys present in a container, sorted.
    fn list_objects(&self, container: &str) -> Result<Vec<String>, VcsError>;

    /// Whether the container exists.
    fn container_exists(&self, container: &str) -> Result<bool, VcsError>;

    /// Create the container if it does not already exist.
    fn create_container(&self, container: &str) -> Result<(), VcsError>;
}

/// Symmetric cipher applied to blobs before they leave the machine.
pub trait SecretCipher: Send + Sync {
    fn encrypt(&self, plain: &[u8]) -> Result<Vec<u8>, VcsError>;
    fn decrypt(&self, cipher: &[u8]) -> Result<Vec<u8>, VcsError>;
}

/// Filesystem-backed blob store. Containers are directories under the
/// store root; object keys may contain `/` and map to nested paths.
#[derive(Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, container: &str, key: &str) -> PathBuf {
        self.root.join(container).join(key)
    }
}

impl BlobStore for LocalBlobStore {
    fn put_object(&self, container: &str, key: &str, data: &[u8]) -> Result<(), VcsError> {
        let path = self.object_path(container, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }

    fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>, VcsError> {
        let path = self.object_path(container, key);
        if !path.is_file() {
            return Err(VcsError::missing(path));
        }
        Ok(fs::read(path)?)
    }

    fn list_objects(&self, container: &str) -> Result<Vec<String>, VcsError> {
        let dir = self.root.join(container);
        if !dir.is_dir() {
            return Err(VcsError::missing(dir));
        }
        let mut keys = Vec::new();
        for entry in walkdir::WalkDir::new(&dir) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&dir)
                .map_err(|_| VcsError::corrupt(entry.path()))?;
            keys.push(crate::types::path_key(rel));
        }
        keys.sort();
        Ok(keys)
    }

    fn container_exists(&self, container: &str) -> Result<bool, VcsError> {
        Ok(self.root.join(container).is_dir())
    }

    fn create_container(&self, container: &str) -> Result<(), VcsError> {
        fs::create_dir_all(self.root.join(container))?;
        Ok(())
    }
}
