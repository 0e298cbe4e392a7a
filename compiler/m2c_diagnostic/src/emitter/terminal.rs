//! Terminal Emitter
//!
//! Renders `path:line:col: severity[CODE]: message`, optionally painted with
//! ANSI escapes. In verbose mode the offending source line is echoed with a
//! caret under the reported column.

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

const RESET: &str = "\x1b[0m";

/// Styles used by the emitter.
#[derive(Clone, Copy)]
enum Paint {
    Fatal,
    Error,
    Warning,
    Emphasis,
    Caret,
}

impl Paint {
    fn escape(self) -> &'static str {
        match self {
            Paint::Fatal => "\x1b[1;35m",
            Paint::Error => "\x1b[1;31m",
            Paint::Warning => "\x1b[1;33m",
            Paint::Emphasis => "\x1b[1m",
            Paint::Caret => "\x1b[1;32m",
        }
    }

    fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Fatal => Paint::Fatal,
            Severity::Error => Paint::Error,
            Severity::Warning => Paint::Warning,
        }
    }
}

/// When to paint output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Paint only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        matches!((self, is_tty), (ColorMode::Always, _) | (ColorMode::Auto, true))
    }
}

/// Closing line of a run, or `None` when nothing was reported.
fn summary_text(errors: usize, warnings: usize) -> Option<(Paint, &'static str, String)> {
    let count = |n: usize, noun: &str| {
        if n == 1 {
            format!("1 {noun}")
        } else {
            format!("{n} {noun}s")
        }
    };
    match (errors, warnings) {
        (0, 0) => None,
        (0, w) => Some((
            Paint::Warning,
            "warning",
            format!("{} emitted", count(w, "warning")),
        )),
        (e, w) => {
            let mut text = if e == 1 {
                "aborting due to previous error".to_owned()
            } else {
                format!("aborting due to {e} previous errors")
            };
            if w > 0 {
                text.push_str(&format!("; {} emitted", count(w, "warning")));
            }
            Some((Paint::Error, "error", text))
        }
    }
}

/// Human-readable diagnostic sink.
pub struct TerminalEmitter<'src, W: Write> {
    out: W,
    painted: bool,
    /// Printed ahead of each position, usually the file path.
    origin: Option<String>,
    /// Present in verbose mode.
    echo: Option<&'src str>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    /// `is_tty` only matters for [`ColorMode::Auto`].
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            out: writer,
            painted: mode.should_use_colors(is_tty),
            origin: None,
            echo: None,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Echo the reported line of `source` below every diagnostic.
    #[must_use]
    pub fn verbose(mut self, source: &'src str) -> Self {
        self.echo = Some(source);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&mut self, paint: Paint, text: &str) {
        let _ = if self.painted {
            write!(self.out, "{}{text}{RESET}", paint.escape())
        } else {
            write!(self.out, "{text}")
        };
    }

    fn echo_line(&mut self, line: u32, column: u32) {
        let Some(source) = self.echo else {
            return;
        };
        let index = (line as usize).checked_sub(1);
        let Some(text) = index.and_then(|i| source.lines().nth(i)) else {
            return;
        };
        // Tabs stay tabs so the caret lands under the same glyph.
        let indent: String = text
            .chars()
            .take(column.saturating_sub(1) as usize)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let _ = write!(self.out, "  {text}\n  {indent}");
        self.paint(Paint::Caret, "^");
        let _ = writeln!(self.out);
    }
}

impl TerminalEmitter<'static, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if let Some(origin) = self.origin.take() {
            self.paint(Paint::Emphasis, &origin);
            let _ = write!(self.out, ":");
            self.origin = Some(origin);
        }
        let _ = write!(self.out, "{}:{}: ", diagnostic.line, diagnostic.column);
        let severity = diagnostic.severity;
        self.paint(Paint::for_severity(severity), &severity.to_string());
        self.paint(Paint::Emphasis, &format!("[{}]", diagnostic.code.as_str()));
        let _ = writeln!(self.out, ": {}", diagnostic.message());
        self.echo_line(diagnostic.line, diagnostic.column);
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if let Some((paint, label, text)) = summary_text(error_count, warning_count) {
            self.paint(paint, label);
            let _ = writeln!(self.out, ": {text}");
        }
    }
}

#[cfg(test)]
mod tests;
