//! Documentation site assembly for gdoc.
//!
//! Turns a request path into a complete HTML page:
//!
//! 1. [`resolve`] splits the path into version, directory and base name
//! 2. [`VersionStore`] reads the version catalog from `versions.yml`
//! 3. [`SidebarStore`] reads the per-version `sidebar.yml`
//! 4. [`ContentLoader`] renders the Markdown source under `_source/`
//! 5. [`PageComposer`] fills the page template
//!
//! [`Handler`] runs the whole pipeline over a [`gdoc_storage::Storage`]
//! backend. All files are re-read on every request.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use gdoc_site::{Handler, HandlerConfig};
//! use gdoc_storage::MockStorage;
//!
//! let storage = MockStorage::new()
//!     .with_file("versions.yml", "v2: \"Version 2\"\n")
//!     .with_file("v2/_source/guide.md", "# Guide");
//! let handler = Handler::with_storage(HandlerConfig::default(), Arc::new(storage)).unwrap();
//!
//! let page = handler.handle("v2/guide.md").unwrap();
//! assert!(page.is_found());
//! assert!(page.html.contains("Version 2"));
//! ```

mod content;
mod error;
mod handler;
mod loaded;
mod page;
mod path;
mod sidebar;
mod versions;

pub use content::{ContentLoader, ContentOrigin, RenderedContent, SOURCE_DIR};
pub use error::SiteError;
pub use gdoc_renderer::TocEntry;
pub use handler::{Handler, HandlerConfig, RenderedPage};
pub use loaded::Loaded;
pub use page::{PageComposer, PageContext, mount_path, version_base_path};
pub use path::{DocumentPath, INDEX_NAME, resolve};
pub use sidebar::{SIDEBAR_FILE, SidebarCategory, SidebarEntry, SidebarStore, SidebarTree};
pub use versions::{
    DEFAULT_VERSION_KEY, DEFAULT_VERSION_TITLE, VERSIONS_FILE, VersionCatalog, VersionEntry,
    VersionStore,
};
