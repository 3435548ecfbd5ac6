//! Compiled-in assets for the gdoc documentation renderer.
//!
//! Assets live as standalone files next to this crate so they are easy to
//! edit and diff, and are included as string constants at build time:
//!
//! - `assets/index.css`: stylesheet inlined into every page
//! - `templates/page.html`: minijinja page template
//! - `source/default.md`: placeholder document rendered for missing content

/// Stylesheet inlined into every page.
pub const INDEX_CSS: &str = include_str!("../assets/index.css");

/// Page template (minijinja syntax).
///
/// Expects `css`, `sidebar`, `sidebar_tree`, `content`, `title`, `toc`,
/// `versions`, `current_version`, `current_version_title`, `prefix_uri`,
/// `base_path`, `content_file_name` and `default_version_name` in its context.
pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

/// Markdown rendered when the requested document does not exist.
pub const DEFAULT_SOURCE: &str = include_str!("../source/default.md");

/// Name under which the page template is registered.
pub const PAGE_TEMPLATE_NAME: &str = "page.html";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_not_empty() {
        assert!(!INDEX_CSS.trim().is_empty());
        assert!(!PAGE_TEMPLATE.trim().is_empty());
        assert!(!DEFAULT_SOURCE.trim().is_empty());
    }

    #[test]
    fn test_template_references_context() {
        for key in [
            "css",
            "sidebar",
            "sidebar_tree",
            "content",
            "versions",
            "current_version_title",
            "prefix_uri",
            "base_path",
            "content_file_name",
            "default_version_name",
        ] {
            assert!(PAGE_TEMPLATE.contains(key), "template does not use {key}");
        }
    }

    #[test]
    fn test_placeholder_has_title() {
        assert!(DEFAULT_SOURCE.starts_with("# "));
    }
}
