//! Markup flavour used by [`MarkdownRenderer`](crate::MarkdownRenderer).
//!
//! The renderer owns document structure. A backend decides how void elements
//! are terminated and may override the few elements built from them.

use std::fmt::Write;

use crate::state::escape_html;

/// Markup flavour for the renderer.
pub trait RenderBackend {
    /// Terminator of void elements, e.g. `>` or ` />`.
    const VOID_END: &'static str;

    /// Write a void element. Attribute values are escaped here.
    fn void_element(name: &str, attrs: &[(&str, &str)], out: &mut String) {
        out.push('<');
        out.push_str(name);
        for (key, value) in attrs {
            write!(out, r#" {key}="{}""#, escape_html(value)).unwrap();
        }
        out.push_str(Self::VOID_END);
    }

    /// Fenced or indented code block, tagged `language-<lang>` when known.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        match lang {
            Some(lang) => write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            ),
            None => write!(out, "<pre><code>{}</code></pre>", escape_html(content)),
        }
        .unwrap();
    }

    /// Image; an empty title is omitted.
    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        if title.is_empty() {
            Self::void_element("img", &[("src", src), ("alt", alt)], out);
        } else {
            Self::void_element("img", &[("src", src), ("title", title), ("alt", alt)], out);
        }
    }

    fn hard_break(out: &mut String) {
        Self::void_element("br", &[], out);
        out.push('\n');
    }

    fn horizontal_rule(out: &mut String) {
        Self::void_element("hr", &[], out);
    }
}
