//! Request path resolution.
//!
//! Request paths use forward slashes regardless of platform, so the helpers
//! here work on `&str` instead of [`std::path::Path`].

/// Base name used when a request names a directory or a version root.
pub const INDEX_NAME: &str = "index.html";

/// A request path split into version, directory and base name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentPath {
    /// Active version identifier.
    pub version: String,
    /// Directory below the version root, without surrounding slashes.
    pub directory: String,
    /// File name requested in `directory` (e.g. `guide.md`, `index.html`).
    pub base_name: String,
}

impl DocumentPath {
    /// Directory and base name joined, without a leading slash.
    ///
    /// ```
    /// use gdoc_site::DocumentPath;
    ///
    /// let path = DocumentPath {
    ///     version: "v2".to_owned(),
    ///     directory: "guides".to_owned(),
    ///     base_name: "intro.md".to_owned(),
    /// };
    /// assert_eq!(path.content_path(), "guides/intro.md");
    /// ```
    #[must_use]
    pub fn content_path(&self) -> String {
        join(&[&self.directory, &self.base_name])
            .trim_start_matches('/')
            .to_owned()
    }
}

/// Resolve a request path into a [`DocumentPath`].
///
/// The first directory segment is the version candidate. It becomes the
/// active version when `is_version` accepts it and is then removed from the
/// front of the directory. Anything else falls back to `default_version` with
/// the whole request treated as content-relative. Never fails.
///
/// # Arguments
///
/// * `request` - Request path relative to the mount point (may be empty)
/// * `default_version` - Version used when the request names none
/// * `is_version` - Whether an identifier is a known version
pub fn resolve(
    request: &str,
    default_version: &str,
    is_version: impl Fn(&str) -> bool,
) -> DocumentPath {
    if request.is_empty() {
        return DocumentPath {
            version: default_version.to_owned(),
            directory: String::new(),
            base_name: INDEX_NAME.to_owned(),
        };
    }

    // A trailing slash names a directory; serve its index.
    let with_index;
    let request = if request.ends_with('/') {
        with_index = format!("{request}{INDEX_NAME}");
        with_index.as_str()
    } else {
        request
    };

    let base_name = base(request);
    let stem = base_name
        .strip_suffix(ext(request))
        .unwrap_or(base_name);
    let mut dir_name = dir(request);
    if dir_name == "." {
        dir_name = "/".to_owned();
    }

    let trimmed = dir_name.trim_matches('/');
    let candidate = trimmed.split('/').next().unwrap_or_default();

    let (version, directory) = if !candidate.is_empty() && is_version(candidate) {
        let rest = trimmed
            .strip_prefix(candidate)
            .unwrap_or(trimmed)
            .trim_start_matches('/');
        (candidate.to_owned(), rest.to_owned())
    } else {
        (default_version.to_owned(), trimmed.to_owned())
    };

    let base_name = if stem != version && !matches!(base_name, "" | "/" | ".") {
        base_name.to_owned()
    } else {
        INDEX_NAME.to_owned()
    };

    tracing::debug!(
        request,
        version = %version,
        directory = %directory,
        base_name = %base_name,
        "Resolved request path"
    );

    DocumentPath {
        version,
        directory,
        base_name,
    }
}

/// Last element of a slash path. Trailing slashes are ignored.
///
/// Returns `"."` for an empty path and `"/"` for a path of only slashes.
pub(crate) fn base(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// All but the last element of a slash path, cleaned.
pub(crate) fn dir(path: &str) -> String {
    let head = path.rfind('/').map_or("", |i| &path[..=i]);
    clean(head)
}

/// Extension of the last element, including the dot.
pub(crate) fn ext(path: &str) -> &str {
    for (i, c) in path.char_indices().rev() {
        match c {
            '/' => break,
            '.' => return &path[i..],
            _ => {}
        }
    }
    ""
}

/// Join non-empty elements with slashes and clean the result.
///
/// Returns an empty string when every element is empty.
pub(crate) fn join(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        joined
    } else {
        clean(&joined)
    }
}

/// Lexically normalise a slash path.
///
/// Collapses repeated slashes, removes `.` segments and resolves `..`
/// against preceding segments. `..` at the root of an absolute path is
/// dropped; in a relative path it is kept. An empty result becomes `"."`
/// (or `"/"` for absolute paths).
pub(crate) fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    match (rooted, body.is_empty()) {
        (true, true) => "/".to_owned(),
        (true, false) => format!("/{body}"),
        (false, true) => ".".to_owned(),
        (false, false) => body,
    }
}

/// Whether a slash path contains a `..` segment.
pub(crate) fn has_parent_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "..")
}
