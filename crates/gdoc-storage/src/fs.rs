//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading documentation files from a local
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{Storage, StorageError, validate_path};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at a documents directory.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use gdoc_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("storage/docs"));
/// let sidebar = storage.read(Path::new("sidebar.yml"))?;
/// ```
#[derive(Clone, Debug)]
pub struct FsStorage {
    /// Root directory for document storage.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage.
    ///
    /// # Arguments
    ///
    /// * `root` - Documents root directory
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Documents root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        validate_path(path, BACKEND)?;
        let full_path = self.root.join(path);
        tracing::debug!(path = %full_path.display(), "Reading file");
        fs::read(&full_path).map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))
    }
}
