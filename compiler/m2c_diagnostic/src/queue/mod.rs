//! Diagnostic collection and per-unit statistics.
//!
//! Every diagnostic of a parse passes through one queue, which keeps the
//! warning and error counts per phase in step with the recorded list.

use crate::{Diagnostic, Phase};

/// Counts reported for one compilation unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    pub declarations: u32,
    pub procedures: u32,
    pub statements: u32,
    pub lexical_warnings: u32,
    pub lexical_errors: u32,
    pub syntax_warnings: u32,
    pub syntax_errors: u32,
    pub semantic_warnings: u32,
    pub semantic_errors: u32,
    pub lines: u32,
}

impl Statistics {
    /// Bump the counter matching the diagnostic's phase and severity.
    pub fn record(&mut self, diagnostic: &Diagnostic) {
        let counter = match (diagnostic.phase(), diagnostic.is_error()) {
            (Phase::Lexical, false) => &mut self.lexical_warnings,
            (Phase::Lexical, true) => &mut self.lexical_errors,
            (Phase::Syntax, false) => &mut self.syntax_warnings,
            (Phase::Syntax, true) => &mut self.syntax_errors,
            (Phase::Semantic, false) => &mut self.semantic_warnings,
            (Phase::Semantic, true) => &mut self.semantic_errors,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn error_count(&self) -> u32 {
        self.lexical_errors + self.syntax_errors + self.semantic_errors
    }

    pub fn warning_count(&self) -> u32 {
        self.lexical_warnings + self.syntax_warnings + self.semantic_warnings
    }

    /// Sum of two units' counts, used for multi-file summaries.
    #[must_use]
    pub fn merged(self, other: Statistics) -> Statistics {
        Statistics {
            declarations: self.declarations + other.declarations,
            procedures: self.procedures + other.procedures,
            statements: self.statements + other.statements,
            lexical_warnings: self.lexical_warnings + other.lexical_warnings,
            lexical_errors: self.lexical_errors + other.lexical_errors,
            syntax_warnings: self.syntax_warnings + other.syntax_warnings,
            syntax_errors: self.syntax_errors + other.syntax_errors,
            semantic_warnings: self.semantic_warnings + other.semantic_warnings,
            semantic_errors: self.semantic_errors + other.semantic_errors,
            lines: self.lines + other.lines,
        }
    }
}

/// Ordered diagnostics of one unit plus their running counts.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    stats: Statistics,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.stats.record(&diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Mutable access for the non-diagnostic counters.
    pub fn stats_mut(&mut self) -> &mut Statistics {
        &mut self.stats
    }

    pub fn has_errors(&self) -> bool {
        self.stats.error_count() > 0
    }

    pub fn into_parts(self) -> (Vec<Diagnostic>, Statistics) {
        (self.diagnostics, self.stats)
    }
}

#[cfg(test)]
mod tests;
