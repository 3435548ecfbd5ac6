//! Outcome of loading an optional YAML file.

use std::path::Path;

use gdoc_storage::{Storage, StorageError};

/// Result of loading a file that may be missing or malformed.
///
/// Missing and malformed files are not errors for the site: both fall back to
/// empty values. Keeping them apart makes the fallback visible to callers and
/// tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Loaded<T> {
    /// File does not exist.
    Absent,
    /// File was read and parsed.
    Parsed(T),
    /// File exists but could not be parsed. Carries the parser message.
    Corrupt(String),
}

impl<T> Loaded<T> {
    /// Parsed value, if any.
    pub fn parsed(self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Absent | Self::Corrupt(_) => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }
}

impl<T: Default> Loaded<T> {
    /// Parsed value, or the empty value for absent and corrupt files.
    pub fn unwrap_or_default(self) -> T {
        self.parsed().unwrap_or_default()
    }
}

/// Read a file's bytes, mapping "not found" to `None`.
pub(crate) fn read_optional(
    storage: &dyn Storage,
    path: &Path,
) -> Result<Option<Vec<u8>>, StorageError> {
    match storage.read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Parse YAML into a mapping, logging and classifying failures.
///
/// An empty document is an empty mapping. Bytes that are not UTF-8 and any
/// other non-mapping document are corrupt.
pub(crate) fn parse_mapping(content: &[u8], path: &Path) -> Loaded<serde_yaml::Mapping> {
    let message = match std::str::from_utf8(content) {
        Ok(text) if text.trim().is_empty() => return Loaded::Parsed(serde_yaml::Mapping::new()),
        Ok(text) => match serde_yaml::from_str::<serde_yaml::Value>(text.trim()) {
            Ok(serde_yaml::Value::Mapping(mapping)) => return Loaded::Parsed(mapping),
            Ok(serde_yaml::Value::Null) => return Loaded::Parsed(serde_yaml::Mapping::new()),
            Ok(_) => "expected a mapping at the top level".to_owned(),
            Err(e) => format!("Invalid YAML: {e}"),
        },
        Err(e) => format!("Invalid UTF-8: {e}"),
    };

    tracing::warn!(path = %path.display(), error = %message, "Ignoring malformed YAML file");
    Loaded::Corrupt(message)
}

/// String form of a scalar YAML value. Sequences and mappings yield `None`.
pub(crate) fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some(String::new()),
        serde_yaml::Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
    }
}
