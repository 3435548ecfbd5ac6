//! Colored status output on stderr.
//!
//! Rendered pages may go to stdout, so status lines never do.

use console::{Style, Term};

pub(crate) struct Output {
    term: Term,
    label: Style,
    ok: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().bold(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    /// `label: value` with the label in bold.
    pub(crate) fn field(&self, label: &str, value: impl std::fmt::Display) {
        self.line(&format!("{} {value}", self.label.apply_to(format!("{label}:"))));
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.ok.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.warn.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.fail.apply_to(msg).to_string());
    }

    fn line(&self, text: &str) {
        // Status output is best effort; a closed stderr is not an error.
        let _ = self.term.write_line(text);
    }
}
