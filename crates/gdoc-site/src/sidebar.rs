//! Sidebar navigation loaded from `sidebar.yml`.
//!
//! The file maps category names to entries, each entry mapping a label to a
//! target page:
//!
//! ```yaml
//! Getting Started:
//!   Introduction: index.html
//!   Installation: install.html
//! ```
//!
//! The default version reads `sidebar.yml` at the documents root; any other
//! version reads `<version>/sidebar.yml`.

use std::path::PathBuf;
use std::sync::Arc;

use gdoc_storage::{Storage, StorageError};
use serde::Serialize;

use crate::loaded::{Loaded, parse_mapping, read_optional, scalar_to_string};

/// Sidebar file name.
pub const SIDEBAR_FILE: &str = "sidebar.yml";

/// A sidebar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    /// Link label.
    pub name: String,
    /// Link target, relative to the version root.
    pub target: String,
}

/// A named group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarCategory {
    pub name: String,
    pub entries: Vec<SidebarEntry>,
}

/// Parsed sidebar, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SidebarTree {
    pub categories: Vec<SidebarCategory>,
}

impl SidebarTree {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Build a tree from a parsed mapping.
    ///
    /// Categories whose value is not a mapping are skipped, as are entries
    /// whose label or target is not a scalar.
    fn from_mapping(mapping: &serde_yaml::Mapping) -> Self {
        let categories = mapping
            .iter()
            .filter_map(|(name, entries)| {
                let name = scalar_to_string(name)?;
                let serde_yaml::Value::Mapping(entries) = entries else {
                    tracing::debug!(category = %name, "Skipping sidebar category without entries");
                    return None;
                };
                let entries = entries
                    .iter()
                    .filter_map(|(label, target)| {
                        Some(SidebarEntry {
                            name: scalar_to_string(label)?,
                            target: scalar_to_string(target)?,
                        })
                    })
                    .collect();
                Some(SidebarCategory { name, entries })
            })
            .collect();
        Self { categories }
    }
}

/// Reads per-version sidebar files from storage.
pub struct SidebarStore {
    storage: Arc<dyn Storage>,
    default_version: String,
}

impl SidebarStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, default_version: impl Into<String>) -> Self {
        Self {
            storage,
            default_version: default_version.into(),
        }
    }

    /// Storage path of the sidebar for `version`.
    #[must_use]
    pub fn sidebar_path(&self, version: &str) -> PathBuf {
        if version == self.default_version || version.is_empty() {
            PathBuf::from(SIDEBAR_FILE)
        } else {
            PathBuf::from(version).join(SIDEBAR_FILE)
        }
    }

    /// Raw text and parsed tree of the sidebar for `version`, from one read.
    ///
    /// The raw text is decoded lossily; bytes that are not UTF-8 leave the
    /// tree corrupt.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the file exists but cannot be read.
    pub fn load(&self, version: &str) -> Result<(String, Loaded<SidebarTree>), StorageError> {
        let path = self.sidebar_path(version);
        let Some(bytes) = read_optional(self.storage.as_ref(), &path)? else {
            return Ok((String::new(), Loaded::Absent));
        };
        let tree = Self::parse(&bytes, &path);
        Ok((String::from_utf8_lossy(&bytes).into_owned(), tree))
    }

    /// Raw sidebar text, empty when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the file exists but cannot be read.
    pub fn get_sidebar(&self, version: &str) -> Result<String, StorageError> {
        Ok(self.load(version)?.0)
    }

    /// Parsed sidebar for `version`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the file exists but cannot be read.
    pub fn parse_sidebar(&self, version: &str) -> Result<Loaded<SidebarTree>, StorageError> {
        Ok(self.load(version)?.1)
    }

    fn parse(content: &[u8], path: &std::path::Path) -> Loaded<SidebarTree> {
        match parse_mapping(content, path) {
            Loaded::Parsed(mapping) => Loaded::Parsed(SidebarTree::from_mapping(&mapping)),
            Loaded::Absent => Loaded::Absent,
            Loaded::Corrupt(message) => Loaded::Corrupt(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use gdoc_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    const SIDEBAR: &str = "\
Getting Started:
  Introduction: index.html
  Installation: install.html
Reference:
  API: reference/api.html
";

    fn store(storage: MockStorage) -> SidebarStore {
        SidebarStore::new(Arc::new(storage), "default")
    }

    #[test]
    fn test_sidebar_path() {
        let store = store(MockStorage::new());
        assert_eq!(store.sidebar_path("default"), PathBuf::from("sidebar.yml"));
        assert_eq!(store.sidebar_path(""), PathBuf::from("sidebar.yml"));
        assert_eq!(store.sidebar_path("v2"), PathBuf::from("v2/sidebar.yml"));
    }

    #[test]
    fn test_get_sidebar_raw() {
        let store = store(MockStorage::new().with_file("sidebar.yml", SIDEBAR));
        assert_eq!(store.get_sidebar("default").unwrap(), SIDEBAR);
    }

    #[test]
    fn test_get_sidebar_per_version() {
        let store = store(
            MockStorage::new()
                .with_file("sidebar.yml", "Root: {}")
                .with_file("v2/sidebar.yml", "V2: {}"),
        );
        assert_eq!(store.get_sidebar("v2").unwrap(), "V2: {}");
        assert_eq!(store.get_sidebar("default").unwrap(), "Root: {}");
    }

    #[test]
    fn test_get_sidebar_absent() {
        let store = store(MockStorage::new());
        assert_eq!(store.get_sidebar("v2").unwrap(), "");
        assert_eq!(store.parse_sidebar("v2").unwrap(), Loaded::Absent);
    }

    #[test]
    fn test_parse_sidebar_keeps_order() {
        let store = store(MockStorage::new().with_file("sidebar.yml", SIDEBAR));
        let tree = store.parse_sidebar("default").unwrap().parsed().unwrap();

        assert_eq!(
            tree,
            SidebarTree {
                categories: vec![
                    SidebarCategory {
                        name: "Getting Started".to_owned(),
                        entries: vec![
                            SidebarEntry {
                                name: "Introduction".to_owned(),
                                target: "index.html".to_owned(),
                            },
                            SidebarEntry {
                                name: "Installation".to_owned(),
                                target: "install.html".to_owned(),
                            },
                        ],
                    },
                    SidebarCategory {
                        name: "Reference".to_owned(),
                        entries: vec![SidebarEntry {
                            name: "API".to_owned(),
                            target: "reference/api.html".to_owned(),
                        }],
                    },
                ],
            }
        );
    }

    #[test]
    fn test_parse_sidebar_skips_non_mapping_category() {
        let content = b"Flat: value\nGuide:\n  Intro: index.html\n";
        let tree = SidebarStore::parse(content, Path::new("s.yml")).parsed().unwrap();
        assert_eq!(tree.categories.len(), 1);
        assert_eq!(tree.categories[0].name, "Guide");
    }

    #[test]
    fn test_parse_sidebar_corrupt() {
        let store = store(MockStorage::new().with_file("sidebar.yml", "Guide:\n  - [oops"));
        assert!(store.parse_sidebar("default").unwrap().is_corrupt());
        // Raw text is still served
        assert!(!store.get_sidebar("default").unwrap().is_empty());
    }

    #[test]
    fn test_sidebar_invalid_utf8() {
        let storage = MockStorage::new().with_bytes("sidebar.yml", b"Caf\xe9:\n  Menu: m.html\n");
        let store = store(storage);
        let (raw, tree) = store.load("default").unwrap();

        assert!(tree.is_corrupt());
        assert!(raw.starts_with("Caf\u{FFFD}:"));
    }

    #[test]
    fn test_unreadable_sidebar_is_error() {
        let store = store(MockStorage::new().with_unreadable("sidebar.yml"));
        assert!(store.get_sidebar("default").is_err());
        assert!(store.parse_sidebar("default").is_err());
    }
}
