//! Status reporting on stderr.
//!
//! stdout is reserved for filtered documents, so every status line goes to
//! stderr, colored only when stderr itself is a terminal.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Styled status reporter.
pub(crate) struct Output {
    term: Term,
    done: Style,
    notice: Style,
    failure: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            done: Style::new().for_stderr().green(),
            notice: Style::new().for_stderr().yellow(),
            failure: Style::new().for_stderr().red(),
        }
    }

    /// Report a completed command (green).
    pub(crate) fn done(&self, msg: &str) {
        self.write(&self.done, msg);
    }

    /// Report a condition the user should know about (yellow).
    pub(crate) fn notice(&self, msg: &str) {
        self.write(&self.notice, msg);
    }

    /// Report a problem with one input file (red), prefixed by its path.
    pub(crate) fn file_failure(&self, path: &Path, err: &dyn Display) {
        self.write(&self.failure, &format!("{}: {err}", path.display()));
    }

    /// Report the error that ended the command (red).
    pub(crate) fn fatal(&self, err: &dyn Display) {
        self.write(&self.failure, &format!("Error: {err}"));
    }

    fn write(&self, style: &Style, msg: &str) {
        if let Err(e) = self.term.write_line(&style.apply_to(msg).to_string()) {
            tracing::debug!(error = %e, "Cannot write status line to stderr");
        }
    }
}
