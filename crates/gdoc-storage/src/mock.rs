//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind, validate_path};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores file contents in memory. Use the builder methods to configure the
/// mock with test data.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use gdoc_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("versions.yml", "v2: Version 2")
///     .with_file("v2/_source/guide.md", "# Guide");
///
/// let content = storage.read(Path::new("v2/_source/guide.md")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    denied: RwLock<Vec<PathBuf>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text file with the given content.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.with_bytes(path, content.into().into_bytes())
    }

    /// Add a file with arbitrary content, not necessarily UTF-8.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_bytes(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Make reads of `path` fail with a permission error.
    ///
    /// Lets tests exercise read failures that are not "not found".
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, path: impl Into<PathBuf>) -> Self {
        self.denied.write().unwrap().push(path.into());
        self
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        validate_path(path, BACKEND)?;
        if self.denied.read().unwrap().iter().any(|p| p == path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }
}
