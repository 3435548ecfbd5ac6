//! Page composition.
//!
//! Fills the compiled-in page template with the sidebar, rendered content,
//! version catalog and URL prefixes.
//!
//! # Trust boundary
//!
//! The raw sidebar text and the rendered content HTML are inserted without
//! escaping. Documentation authors are trusted: raw HTML in Markdown and the
//! sidebar file reach the browser as written. Every other value is escaped by
//! the template engine.

use gdoc_renderer::escape_html;
use minijinja::{Environment, Value, context};

use crate::content::RenderedContent;
use crate::error::SiteError;
use crate::path::join;
use crate::sidebar::SidebarTree;
use crate::versions::VersionCatalog;

/// Everything needed to render one page.
pub struct PageContext<'a> {
    /// Raw sidebar file text.
    pub sidebar: &'a str,
    pub sidebar_tree: &'a SidebarTree,
    pub content: &'a RenderedContent,
    pub catalog: &'a VersionCatalog,
    /// Active version identifier.
    pub version: &'a str,
    pub default_version: &'a str,
    /// URL mount prefix (e.g. `docs`).
    pub prefix_uri: &'a str,
    /// Content path relative to the version root.
    pub content_path: &'a str,
}

/// Renders pages from the compiled-in template.
///
/// The template is parsed once, when the composer is built.
pub struct PageComposer {
    env: Environment<'static>,
}

impl PageComposer {
    /// Build a composer around the compiled-in template.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Template` if the template does not parse.
    pub fn new() -> Result<Self, SiteError> {
        Self::with_template(gdoc_assets::PAGE_TEMPLATE)
    }

    /// Build a composer around a custom template source.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Template` if the template does not parse.
    pub fn with_template(source: &'static str) -> Result<Self, SiteError> {
        let mut env = Environment::new();
        env.add_template(gdoc_assets::PAGE_TEMPLATE_NAME, source)?;
        Ok(Self { env })
    }

    /// Render a page.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Template` if rendering fails.
    pub fn compose(&self, page: &PageContext<'_>) -> Result<String, SiteError> {
        let title_key = if page.version.is_empty() {
            page.default_version
        } else {
            page.version
        };
        let current_version_title = page.catalog.title(title_key).unwrap_or_default();

        let current_version = if page.version == page.default_version {
            ""
        } else {
            page.version
        };

        let template = self.env.get_template(gdoc_assets::PAGE_TEMPLATE_NAME)?;
        let html = template.render(context! {
            css => Value::from_safe_string(gdoc_assets::INDEX_CSS.to_owned()),
            sidebar => Value::from_safe_string(page.sidebar.to_owned()),
            sidebar_tree => page.sidebar_tree,
            content => Value::from_safe_string(page.content.html.clone()),
            title => page.content.title.as_deref(),
            toc => &page.content.toc,
            versions => page.catalog.entries(),
            current_version => current_version,
            current_version_title => current_version_title,
            prefix_uri => url_value(mount_path(page.prefix_uri)),
            base_path => url_value(version_base_path(page.prefix_uri, current_version)),
            content_file_name => page.content_path.trim_start_matches('/'),
            default_version_name => page.default_version,
        })?;
        Ok(html)
    }
}

/// A computed URL, escaped here so the template keeps its slashes readable.
fn url_value(url: String) -> Value {
    Value::from_safe_string(escape_html(&url))
}

/// URL of the documentation mount point, with one trailing slash.
///
/// ```
/// use gdoc_site::mount_path;
///
/// assert_eq!(mount_path("docs"), "/docs/");
/// assert_eq!(mount_path(""), "/");
/// ```
#[must_use]
pub fn mount_path(prefix: &str) -> String {
    with_trailing_slash(join(&["/", prefix]))
}

/// URL of a version root below the mount point, with one trailing slash.
///
/// An empty version yields the mount point itself.
#[must_use]
pub fn version_base_path(prefix: &str, version: &str) -> String {
    with_trailing_slash(join(&["/", prefix, version]))
}

fn with_trailing_slash(mut path: String) -> String {
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use gdoc_renderer::TocEntry;

    use super::*;
    use crate::content::ContentOrigin;
    use crate::sidebar::{SidebarCategory, SidebarEntry};

    fn content(html: &str) -> RenderedContent {
        RenderedContent {
            html: html.to_owned(),
            title: Some("Guide".to_owned()),
            toc: vec![TocEntry {
                level: 2,
                title: "Setup".to_owned(),
                id: "setup".to_owned(),
            }],
            origin: ContentOrigin::File,
        }
    }

    fn sidebar_tree() -> SidebarTree {
        SidebarTree {
            categories: vec![SidebarCategory {
                name: "Start".to_owned(),
                entries: vec![SidebarEntry {
                    name: "Guide".to_owned(),
                    target: "guide.md".to_owned(),
                }],
            }],
        }
    }

    fn compose(version: &str, catalog: &VersionCatalog) -> String {
        let composer = PageComposer::new().unwrap();
        let content = content(r#"<p class="x">Body & more</p>"#);
        let tree = sidebar_tree();
        composer
            .compose(&PageContext {
                sidebar: "Start:\n  Guide: guide.md\n",
                sidebar_tree: &tree,
                content: &content,
                catalog,
                version,
                default_version: "default",
                prefix_uri: "docs",
                content_path: "/guide.md",
            })
            .unwrap()
    }

    #[test]
    fn test_mount_path() {
        assert_eq!(mount_path("docs"), "/docs/");
        assert_eq!(mount_path("/docs/"), "/docs/");
        assert_eq!(mount_path("a/b"), "/a/b/");
        assert_eq!(mount_path(""), "/");
    }

    #[test]
    fn test_version_base_path() {
        assert_eq!(version_base_path("docs", "v2"), "/docs/v2/");
        assert_eq!(version_base_path("docs", ""), "/docs/");
        assert_eq!(version_base_path("", "v2"), "/v2/");
        assert_eq!(version_base_path("", ""), "/");
    }

    #[test]
    fn test_content_not_escaped() {
        let html = compose("default", &VersionCatalog::default());
        assert!(html.contains(r#"<p class="x">Body & more</p>"#));
    }

    #[test]
    fn test_sidebar_raw_and_tree() {
        let html = compose("default", &VersionCatalog::default());
        assert!(html.contains("Start:\n  Guide: guide.md\n"));
        assert!(html.contains(r#"<a href="/docs/guide.md" class="active">Guide</a>"#));
    }

    #[test]
    fn test_default_version_blanked() {
        let catalog = VersionCatalog::from_pairs([("v2", "Version 2")]).with_default();
        let html = compose("default", &catalog);

        assert!(html.contains(r#"data-version="""#));
        assert!(html.contains(r#"data-file="guide.md""#));
        assert!(html.contains(r#"<span class="current">Default</span>"#));
    }

    #[test]
    fn test_named_version() {
        let catalog = VersionCatalog::from_pairs([("v2", "Version 2")]).with_default();
        let html = compose("v2", &catalog);

        assert!(html.contains(r#"data-version="v2""#));
        assert!(html.contains(r#"<span class="current">Version 2</span>"#));
        assert!(html.contains(r#"<a href="/docs/v2/guide.md" class="active">"#));
        // Version switcher links
        assert!(html.contains(r#"<a href="/docs/v2/">Version 2</a>"#));
        assert!(html.contains(r#"<a href="/docs/">Default</a>"#));
    }

    #[test]
    fn test_title_and_toc() {
        let html = compose("default", &VersionCatalog::default());
        assert!(html.contains("<title>Guide | Documentation</title>"));
        assert!(html.contains(r##"<a href="#setup">Setup</a>"##));
    }

    #[test]
    fn test_catalog_values_escaped() {
        let catalog = VersionCatalog::from_pairs([("v2", "<b>Two</b>")]).with_default();
        let html = compose("v2", &catalog);
        assert!(html.contains("&lt;b&gt;Two"));
        assert!(!html.contains("<b>Two</b>"));
    }

    #[test]
    fn test_stylesheet_inlined() {
        let html = compose("default", &VersionCatalog::default());
        assert!(html.contains(".sidebar li > a"));
    }

    #[test]
    fn test_invalid_template_rejected() {
        let result = PageComposer::with_template("{% if %}");
        assert!(matches!(result, Err(SiteError::Template(_))));
    }
}
