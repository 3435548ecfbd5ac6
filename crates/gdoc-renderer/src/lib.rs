//! Fixed-dialect markdown renderer for gdoc.
//!
//! This crate provides a generic [`MarkdownRenderer`] that produces XHTML
//! through the [`RenderBackend`] trait. The dialect is fixed: every document
//! is parsed with the same [`dialect_options`] and post-processed with the
//! same typographic rules, so pages render identically regardless of who
//! requests them.
//!
//! # Dialect
//!
//! - XHTML-compliant void elements (`<br />`, `<hr />`, `<img ... />`)
//! - Smart punctuation: curly quotes, `--` and `---` dashes, ellipsis,
//!   fractions (`1/2` becomes `&frac12;`)
//! - Tables, fenced code blocks, strikethrough, definition lists
//! - Autolinking of bare `http://`, `https://`, `ftp://` and `www.` URLs
//! - Backslash line breaks
//! - Explicit (`# Title {#id}`) and automatic heading anchors
//!
//! # Example
//!
//! ```
//! use gdoc_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new().render_markdown("# Title\n\n*hi*");
//! assert!(result.html.contains(r#"<h1 id="title">Title</h1>"#));
//! assert!(result.html.contains("<em>hi</em>"));
//! ```

mod backend;
mod html;
mod renderer;
mod state;
mod typography;

pub use backend::RenderBackend;
pub use html::HtmlBackend;
pub use renderer::{MarkdownRenderer, RenderResult, dialect_options};
pub use state::{TocEntry, escape_html, slugify};
