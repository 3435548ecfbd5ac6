//! XHTML backend.

use crate::backend::RenderBackend;

/// XHTML render backend: void elements are self-closed (`<br />`) so pages
/// stay well-formed XML.
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    const VOID_END: &'static str = " />";
}
