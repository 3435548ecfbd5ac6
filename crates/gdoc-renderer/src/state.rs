//! State structs for markdown rendering.
//!
//! These structs track context while the renderer walks the event stream.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Raw text collected while inside a code block or an image.
///
/// Captured text bypasses inline conversion: code is escaped as a whole and
/// image alt text drops its markup.
#[derive(Default)]
pub(crate) struct Capture(Option<String>);

impl Capture {
    pub(crate) fn start(&mut self) {
        self.0 = Some(String::new());
    }

    /// Stop capturing and return the collected text.
    pub(crate) fn finish(&mut self) -> String {
        self.0.take().unwrap_or_default()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.0.is_some()
    }

    /// Append text; ignored when not capturing.
    pub(crate) fn push_str(&mut self, text: &str) {
        if let Some(buffer) = &mut self.0 {
            buffer.push_str(text);
        }
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    /// Whether we're inside the table header row.
    in_head: bool,
    /// Column alignments for current table.
    alignments: Vec<Alignment>,
    /// Current column index in table row.
    cell_index: usize,
}

impl TableState {
    /// Start a new table with column alignments.
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Get the alignment style for the current cell.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// A heading that has been fully captured.
pub(crate) struct CompletedHeading {
    pub(crate) level: u8,
    pub(crate) id: String,
    pub(crate) html: String,
}

/// State for tracking headings, anchors and the page title.
#[derive(Default)]
pub(crate) struct HeadingState {
    /// Title from the first H1.
    title: Option<String>,
    /// Current heading level (None if not in a heading).
    current_level: Option<u8>,
    /// Explicit `{#id}` of the current heading.
    explicit_id: Option<String>,
    /// Heading plain text (for slug and table of contents).
    text: String,
    /// Heading HTML (with inline formatting).
    html: String,
    toc: Vec<TocEntry>,
    /// Counter for generating unique heading IDs.
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    /// Start tracking a heading.
    pub(crate) fn start_heading(&mut self, level: u8, explicit_id: Option<String>) {
        self.current_level = Some(level);
        self.explicit_id = explicit_id.filter(|id| !id.is_empty());
        self.text.clear();
        self.html.clear();
    }

    /// Complete the current heading and record its table of contents entry.
    ///
    /// The first H1 becomes the page title and is left out of the table of
    /// contents. It is still rendered.
    pub(crate) fn complete_heading(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);
        let base = self
            .explicit_id
            .take()
            .unwrap_or_else(|| slugify(&text));
        let id = self.unique_id(base);

        let title = text.trim().to_owned();
        if level == 1 && self.title.is_none() {
            self.title = Some(title);
        } else {
            self.toc.push(TocEntry {
                level,
                title,
                id: id.clone(),
            });
        }

        Some(CompletedHeading { level, id, html })
    }

    /// De-duplicate an anchor ID with `-1`, `-2`, ... suffixes.
    fn unique_id(&mut self, base_id: String) -> String {
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Convert heading text to an anchor slug.
///
/// Lowercases letters and digits (any script), collapses runs of whitespace,
/// dashes and underscores into single dashes, and drops everything else.
/// Text without a single letter or digit yields `"section"`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "section".to_owned()
    } else {
        result
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
