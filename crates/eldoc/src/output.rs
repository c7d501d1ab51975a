//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Command results go to stdout; status messages go to stderr.
pub(crate) struct Output {
    out: Term,
    err: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Print a command result line to stdout.
    pub(crate) fn print(&self, msg: &str) {
        let _ = self.out.write_line(msg);
    }

    /// Print a heading line to stdout (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        let _ = self
            .out
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a two-column entry to stdout, the second column dimmed.
    pub(crate) fn entry(&self, name: &str, detail: &str) {
        let _ = self.out.write_line(&format!(
            "  {name:<16} {}",
            self.dim.apply_to(detail)
        ));
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.err.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.err.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.err.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }
}
