//! Markdown content lookup and rendering.
//!
//! A content path such as `guides/intro.html` for version `v2` is looked up
//! as `v2/_source/guides/intro.md`. The default version lives at the
//! documents root: `_source/guides/intro.md`.

use std::path::PathBuf;
use std::sync::Arc;

use gdoc_renderer::{HtmlBackend, MarkdownRenderer, TocEntry};
use gdoc_storage::{Storage, StorageErrorKind};

use crate::error::SiteError;
use crate::path::{ext, has_parent_segment, join};

/// Directory holding Markdown sources inside each version root.
pub const SOURCE_DIR: &str = "_source";

/// Where rendered content came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentOrigin {
    /// A Markdown file under `_source/`.
    File,
    /// The built-in placeholder, because no file matched.
    Placeholder,
}

/// Content rendered to HTML.
#[derive(Clone, Debug)]
pub struct RenderedContent {
    pub html: String,
    /// Title from the first H1 heading.
    pub title: Option<String>,
    pub toc: Vec<TocEntry>,
    pub origin: ContentOrigin,
}

/// Loads Markdown sources and renders them with the fixed dialect.
pub struct ContentLoader {
    storage: Arc<dyn Storage>,
    default_version: String,
}

impl ContentLoader {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, default_version: impl Into<String>) -> Self {
        Self {
            storage,
            default_version: default_version.into(),
        }
    }

    /// Storage key of the Markdown source for a content path.
    ///
    /// Returns `None` when the path tries to leave the documents root.
    #[must_use]
    pub fn source_path(&self, version: &str, content_path: &str) -> Option<PathBuf> {
        if has_parent_segment(content_path) || has_parent_segment(version) {
            return None;
        }
        let version = if version == self.default_version {
            ""
        } else {
            version
        };
        let stem = content_path
            .strip_suffix(ext(content_path))
            .unwrap_or(content_path);
        let key = join(&[version, SOURCE_DIR, stem]);
        Some(PathBuf::from(format!(
            "{}.md",
            key.trim_start_matches('/')
        )))
    }

    /// Load and render the content for `content_path` in `version`.
    ///
    /// Missing files, directories at the source key and paths outside the
    /// documents root render the placeholder document. Sources that are not
    /// valid UTF-8 are decoded lossily.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Storage` when the source exists but cannot be read.
    pub fn load(&self, version: &str, content_path: &str) -> Result<RenderedContent, SiteError> {
        let Some(path) = self.source_path(version, content_path) else {
            tracing::debug!(content_path, "Rejected content path outside the documents root");
            return Ok(render(gdoc_assets::DEFAULT_SOURCE, ContentOrigin::Placeholder));
        };

        match self.storage.read(&path) {
            Ok(bytes) => {
                tracing::debug!(path = %path.display(), "Rendering content");
                Ok(render(&String::from_utf8_lossy(&bytes), ContentOrigin::File))
            }
            Err(e)
                if matches!(
                    e.kind,
                    StorageErrorKind::NotFound | StorageErrorKind::InvalidPath
                ) =>
            {
                tracing::debug!(path = %path.display(), "Content not found, using placeholder");
                Ok(render(gdoc_assets::DEFAULT_SOURCE, ContentOrigin::Placeholder))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Render Markdown with the fixed dialect.
fn render(markdown: &str, origin: ContentOrigin) -> RenderedContent {
    let result = MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown);
    RenderedContent {
        html: result.html,
        title: result.title,
        toc: result.toc,
        origin,
    }
}
