//! Request handling: resolve, load, compose.

use std::path::PathBuf;
use std::sync::Arc;

use gdoc_storage::{FsStorage, Storage};

use crate::content::{ContentLoader, ContentOrigin};
use crate::error::SiteError;
use crate::loaded::Loaded;
use crate::page::{PageComposer, PageContext};
use crate::path::resolve;
use crate::sidebar::SidebarStore;
use crate::versions::VersionStore;

/// Handler configuration, fixed at construction.
#[derive(Clone, Debug)]
pub struct HandlerConfig {
    /// Version used when a request names none.
    pub default_version: String,
    /// Documents root.
    pub docs_dir: PathBuf,
    /// URL mount prefix (e.g. `docs`).
    pub prefix_uri: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            default_version: "default".to_owned(),
            docs_dir: PathBuf::from("storage/docs"),
            prefix_uri: "docs".to_owned(),
        }
    }
}

/// A fully rendered page.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    pub html: String,
    /// Whether the content came from a file or the placeholder.
    pub origin: ContentOrigin,
    /// Active version identifier.
    pub version: String,
    /// Content path relative to the version root.
    pub content_path: String,
}

impl RenderedPage {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.html.as_bytes()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.html.into_bytes()
    }

    /// Whether a source file matched the request.
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.origin == ContentOrigin::File
    }
}

/// Renders documentation pages for request paths.
///
/// Holds no mutable state: every call re-reads `versions.yml`, the sidebar
/// and the content from storage.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), gdoc_site::SiteError> {
/// use gdoc_site::{Handler, HandlerConfig};
///
/// let handler = Handler::new(HandlerConfig::default())?;
/// let page = handler.handle("v2/guide.md")?;
/// println!("{}", page.html);
/// # Ok(())
/// # }
/// ```
pub struct Handler {
    config: HandlerConfig,
    versions: VersionStore,
    sidebars: SidebarStore,
    content: ContentLoader,
    composer: PageComposer,
}

impl Handler {
    /// Create a handler reading from `config.docs_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Template` if the page template does not parse.
    pub fn new(config: HandlerConfig) -> Result<Self, SiteError> {
        let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.docs_dir.clone()));
        Self::with_storage(config, storage)
    }

    /// Create a handler over an explicit storage backend.
    ///
    /// `config.docs_dir` is informational; all reads go through `storage`.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Template` if the page template does not parse.
    pub fn with_storage(
        config: HandlerConfig,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, SiteError> {
        Ok(Self {
            versions: VersionStore::new(Arc::clone(&storage)),
            sidebars: SidebarStore::new(Arc::clone(&storage), config.default_version.clone()),
            content: ContentLoader::new(storage, config.default_version.clone()),
            composer: PageComposer::new()?,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Render the page for a request path relative to the mount point.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Storage` when a file exists but cannot be read and
    /// `SiteError::Template` when the page template fails to render.
    pub fn handle(&self, request: &str) -> Result<RenderedPage, SiteError> {
        let catalog = self.versions.load()?;
        if let Loaded::Corrupt(message) = &catalog {
            tracing::warn!(error = %message, "Version catalog is corrupt, using defaults");
        }
        let catalog = catalog.unwrap_or_default();

        let path = resolve(request, &self.config.default_version, |candidate| {
            catalog.is_declared(candidate)
        });
        let content_path = path.content_path();

        let (sidebar, sidebar_tree) = self.sidebars.load(&path.version)?;
        let sidebar_tree = sidebar_tree.unwrap_or_default();

        let content = self.content.load(&path.version, &content_path)?;

        let html = self.composer.compose(&PageContext {
            sidebar: &sidebar,
            sidebar_tree: &sidebar_tree,
            content: &content,
            catalog: &catalog,
            version: &path.version,
            default_version: &self.config.default_version,
            prefix_uri: &self.config.prefix_uri,
            content_path: &content_path,
        })?;

        tracing::debug!(
            request,
            version = %path.version,
            content_path = %content_path,
            found = content.origin == ContentOrigin::File,
            "Rendered page"
        );

        Ok(RenderedPage {
            html,
            origin: content.origin,
            version: path.version,
            content_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use gdoc_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn handler(storage: MockStorage) -> Handler {
        Handler::with_storage(HandlerConfig::default(), Arc::new(storage)).unwrap()
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_handler_is_send_sync() {
        assert_send_sync::<Handler>();
    }

    #[test]
    fn test_default_config() {
        let config = HandlerConfig::default();
        assert_eq!(config.default_version, "default");
        assert_eq!(config.docs_dir, PathBuf::from("storage/docs"));
        assert_eq!(config.prefix_uri, "docs");
    }

    #[test]
    fn test_empty_path_renders_default_index() {
        let handler =
            handler(MockStorage::new().with_file("_source/index.md", "# Welcome\n\nStart here."));
        let page = handler.handle("").unwrap();

        assert!(page.is_found());
        assert_eq!(page.version, "default");
        assert_eq!(page.content_path, "index.html");
        assert!(page.html.contains(r#"<h1 id="welcome">Welcome</h1>"#));
        assert!(page.html.contains("<p>Start here.</p>"));
        // Default version is blanked in the computed URLs
        assert!(page.html.contains(r#"data-version="""#));
    }

    #[test]
    fn test_versioned_request() {
        let handler = handler(
            MockStorage::new()
                .with_file("versions.yml", "v2: \"Version 2\"\n")
                .with_file("v2/_source/guide.md", "# Guide v2"),
        );
        let page = handler.handle("v2/guide.md").unwrap();

        assert!(page.is_found());
        assert_eq!(page.version, "v2");
        assert!(page.html.contains(r#"<span class="current">Version 2</span>"#));
        assert!(page.html.contains("Guide v2"));
        assert!(page.html.contains(r#"data-version="v2""#));
    }

    #[test]
    fn test_unknown_version_is_content_path() {
        let handler = handler(
            MockStorage::new()
                .with_file("versions.yml", "v2: \"Version 2\"\n")
                .with_file("_source/v3/guide.md", "# Old layout"),
        );
        let page = handler.handle("v3/guide.md").unwrap();

        assert_eq!(page.version, "default");
        assert_eq!(page.content_path, "v3/guide.md");
        assert!(page.html.contains("Old layout"));
    }

    #[test]
    fn test_missing_content_renders_placeholder() {
        let handler = handler(MockStorage::new());
        let page = handler.handle("nowhere/page.html").unwrap();

        assert!(!page.is_found());
        assert_eq!(page.origin, ContentOrigin::Placeholder);
        assert!(page.html.contains("Page Not Found"));
    }

    #[test]
    fn test_traversal_never_reads_outside_root() {
        let handler = handler(MockStorage::new().with_file("secret.md", "# Top secret"));
        let page = handler.handle("../secret.md").unwrap();

        assert!(!page.is_found());
        assert!(!page.html.contains("Top secret"));
    }

    #[test]
    fn test_version_sidebar_used() {
        let handler = handler(
            MockStorage::new()
                .with_file("versions.yml", "v2: \"Version 2\"\n")
                .with_file("sidebar.yml", "Root:\n  Home: index.html\n")
                .with_file("v2/sidebar.yml", "Second:\n  Guide: guide.md\n"),
        );
        let page = handler.handle("v2/guide.md").unwrap();

        assert!(page.html.contains("<h2>Second</h2>"));
        assert!(!page.html.contains("<h2>Root</h2>"));
    }

    #[test]
    fn test_corrupt_yaml_still_renders() {
        let handler = handler(
            MockStorage::new()
                .with_file("versions.yml", "v2: [broken")
                .with_file("sidebar.yml", "Guide:\n  - [oops")
                .with_file("_source/index.md", "# Home"),
        );
        let page = handler.handle("").unwrap();

        assert!(page.is_found());
        assert!(page.html.contains("Home"));
    }

    #[test]
    fn test_unreadable_content_is_error() {
        let handler = handler(MockStorage::new().with_unreadable("_source/index.md"));
        assert!(matches!(handler.handle(""), Err(SiteError::Storage(_))));
    }

    #[test]
    fn test_unreadable_versions_is_error() {
        let handler = handler(MockStorage::new().with_unreadable("versions.yml"));
        assert!(matches!(handler.handle(""), Err(SiteError::Storage(_))));
    }

    #[test]
    fn test_custom_prefix() {
        let config = HandlerConfig {
            prefix_uri: "manual".to_owned(),
            ..HandlerConfig::default()
        };
        let storage = MockStorage::new()
            .with_file("versions.yml", "v1: One\n")
            .with_file("v1/sidebar.yml", "Start:\n  Intro: intro.html\n");
        let handler = Handler::with_storage(config, Arc::new(storage)).unwrap();

        let page = handler.handle("v1/").unwrap();

        assert!(page.html.contains(r#"<a href="/manual/v1/intro.html">Intro</a>"#));
        assert!(page.html.contains(r#"<a href="/manual/">Default</a>"#));
    }

    #[test]
    fn test_filesystem_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("versions.yml"), "v2: \"Version 2\"\n").unwrap();
        std::fs::create_dir_all(root.join("v2/_source")).unwrap();
        std::fs::write(root.join("v2/_source/guide.md"), "# Guide\n\nVersion two.").unwrap();

        let handler = Handler::new(HandlerConfig {
            docs_dir: root.to_path_buf(),
            ..HandlerConfig::default()
        })
        .unwrap();
        let page = handler.handle("v2/guide.md").unwrap();

        assert!(page.is_found());
        assert!(page.html.contains(r#"<span class="current">Version 2</span>"#));
        assert!(page.html.contains("<p>Version two.</p>"));
        assert!(!page.into_bytes().is_empty());
    }

    #[test]
    fn test_filesystem_non_utf8_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("versions.yml"), b"v2: \"Versi\xf3n 2\"\n").unwrap();
        std::fs::write(root.join("sidebar.yml"), b"Gu\xeda:\n  Inicio: index.html\n").unwrap();
        std::fs::create_dir_all(root.join("_source")).unwrap();
        std::fs::write(root.join("_source/index.md"), b"# Caf\xe9\n\nBienvenido.").unwrap();

        let handler = Handler::new(HandlerConfig {
            docs_dir: root.to_path_buf(),
            ..HandlerConfig::default()
        })
        .unwrap();
        let page = handler.handle("").unwrap();

        assert!(page.is_found());
        assert!(page.html.contains("Caf\u{FFFD}"));
        assert!(page.html.contains("<p>Bienvenido.</p>"));
        // Corrupt catalog and sidebar fall back to empty values
        assert!(!page.html.contains(r#"class="versions""#));
        assert!(!page.html.contains("<h2>"));
        // Raw sidebar text is still embedded
        assert!(page.html.contains("Gu\u{FFFD}a:"));
    }

    #[test]
    fn test_directory_at_source_key_renders_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("_source/api.md")).unwrap();

        let handler = Handler::new(HandlerConfig {
            docs_dir: dir.path().to_path_buf(),
            ..HandlerConfig::default()
        })
        .unwrap();
        let page = handler.handle("api.html").unwrap();

        assert!(!page.is_found());
        assert!(page.html.contains("Page Not Found"));
    }
}
