//! Version catalog loaded from `versions.yml`.
//!
//! The file is a flat mapping from version identifier to display title:
//!
//! ```yaml
//! v2: "Version 2"
//! v1: "Version 1"
//! ```
//!
//! It is read on every call; nothing is cached.

use std::path::Path;
use std::sync::Arc;

use gdoc_storage::{Storage, StorageError};
use serde::Serialize;

use crate::loaded::{Loaded, parse_mapping, read_optional, scalar_to_string};

/// File holding the version catalog, relative to the documents root.
pub const VERSIONS_FILE: &str = "versions.yml";

/// Key of the entry every non-empty catalog carries.
pub const DEFAULT_VERSION_KEY: &str = "default";

/// Title given to a `default` entry the file does not declare.
pub const DEFAULT_VERSION_TITLE: &str = "Default";

/// A version identifier and its display title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    pub id: String,
    pub title: String,
}

/// Ordered mapping from version identifier to display title.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionCatalog {
    entries: Vec<VersionEntry>,
    /// Whether the `default` entry was added rather than read from the file.
    synthesized_default: bool,
}

impl VersionCatalog {
    /// Build a catalog from `(id, title)` pairs, keeping the first title of
    /// duplicated ids. No `default` entry is added.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut catalog = Self::default();
        for (id, title) in pairs {
            let id = id.into();
            if !catalog.contains(&id) {
                catalog.entries.push(VersionEntry {
                    id,
                    title: title.into(),
                });
            }
        }
        catalog
    }

    /// Display title of a version.
    #[must_use]
    pub fn title(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.title.as_str())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.title(id).is_some()
    }

    /// Whether `id` was listed in the file, as opposed to synthesized.
    #[must_use]
    pub fn is_declared(&self, id: &str) -> bool {
        self.contains(id) && !(self.synthesized_default && id == DEFAULT_VERSION_KEY)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in file order, with a synthesized `default` last.
    #[must_use]
    pub fn entries(&self) -> &[VersionEntry] {
        &self.entries
    }

    /// Add a `default` entry when a non-empty catalog lacks one.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        if !self.is_empty() && !self.contains(DEFAULT_VERSION_KEY) {
            self.entries.push(VersionEntry {
                id: DEFAULT_VERSION_KEY.to_owned(),
                title: DEFAULT_VERSION_TITLE.to_owned(),
            });
            self.synthesized_default = true;
        }
        self
    }
}

/// Reads the version catalog from storage.
pub struct VersionStore {
    storage: Arc<dyn Storage>,
}

impl VersionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Load the catalog, with `default` synthesized when missing.
    ///
    /// Scalar titles are stringified; entries whose key or title is a
    /// sequence or mapping are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the file exists but cannot be read.
    pub fn load(&self) -> Result<Loaded<VersionCatalog>, StorageError> {
        let path = Path::new(VERSIONS_FILE);
        let Some(bytes) = read_optional(self.storage.as_ref(), path)? else {
            tracing::debug!("No versions file");
            return Ok(Loaded::Absent);
        };

        Ok(match parse_mapping(&bytes, path) {
            Loaded::Parsed(mapping) => {
                let pairs = mapping.iter().filter_map(|(key, value)| {
                    Some((scalar_to_string(key)?, scalar_to_string(value)?))
                });
                Loaded::Parsed(VersionCatalog::from_pairs(pairs).with_default())
            }
            Loaded::Absent => Loaded::Absent,
            Loaded::Corrupt(message) => Loaded::Corrupt(message),
        })
    }

    /// Catalog lookup for a requested version.
    ///
    /// - Absent or corrupt file: `Some` empty catalog (only defaults apply)
    /// - `id` not declared in the file: `None`
    /// - Otherwise: the full catalog, `default` included
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the file exists but cannot be read.
    pub fn get_version(&self, id: &str) -> Result<Option<VersionCatalog>, StorageError> {
        Ok(match self.load()? {
            Loaded::Parsed(catalog) => catalog.is_declared(id).then_some(catalog),
            Loaded::Absent | Loaded::Corrupt(_) => Some(VersionCatalog::default()),
        })
    }
}
