//! Site error type.

use gdoc_storage::StorageError;

/// Error returned when a page cannot be produced.
///
/// Missing files are not errors; they fall back to empty values or the
/// placeholder document.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Storage failed for a reason other than a missing file.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// The page template failed to compile or render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}
