//! Recursive descent parser for the m2c front end.
//!
//! One method per production, one symbol of lookahead, panic-mode recovery
//! on every mismatch. A parse always yields a tree unless the unit fails
//! structurally: wrong start symbol, unreadable source, or nesting past the
//! configured limit.

mod grammar;
mod parser;
mod recovery;
mod stack;

use std::path::Path;

use m2c_diagnostic::{Diagnostic, Severity, Statistics};
use m2c_ir::{AstNode, StringInterner};
use m2c_lexer::{LexerOptions, Symbol};
use m2c_lexer_core::{SourceBuffer, SourceError};

use parser::Parser;

/// Nesting limit used by [`ParseOptions::default`].
pub const DEFAULT_MAX_NESTING: u32 = 256;

/// Which compilation units a parse accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceKind {
    #[default]
    Any,
    /// `DEFINITION MODULE` only.
    Definition,
    /// `IMPLEMENTATION MODULE` or program `MODULE`.
    ImplementationOrProgram,
}

/// Record type syntax, fixed for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordGrammar {
    /// Variant records: `CASE` field lists, no base type.
    #[default]
    Variant,
    /// Extensible records: optional `(Base)` after `RECORD`, no variants.
    Extensible,
}

/// Configuration of one parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub lexer: LexerOptions,
    /// Severity of a `;` directly before a closing symbol.
    pub errant_semicolon: Severity,
    pub record_grammar: RecordGrammar,
    /// Deepest nesting of expressions, statements, types and procedures.
    pub max_nesting: u32,
    /// Echo source lines under diagnostics when rendering.
    pub verbose: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            lexer: LexerOptions::empty(),
            errant_semicolon: Severity::Warning,
            record_grammar: RecordGrammar::Variant,
            max_nesting: DEFAULT_MAX_NESTING,
            verbose: false,
        }
    }
}

/// A parsed compilation unit.
#[derive(Debug)]
pub struct ParseOutput {
    pub ast: AstNode,
    /// Arena for every lexeme the tree and the trivia refer to.
    pub interner: StringInterner,
    pub stats: Statistics,
    pub diagnostics: Vec<Diagnostic>,
    /// Comments and pragmas, in source order.
    pub trivia: Vec<Symbol>,
}

impl ParseOutput {
    pub fn sexpr(&self) -> String {
        self.ast.to_sexpr(&self.interner)
    }

    pub fn has_errors(&self) -> bool {
        self.stats.error_count() > 0
    }
}

/// Why a compilation unit produced no tree.
#[derive(Debug, thiserror::Error)]
pub enum FailureKind {
    #[error("source does not start with the expected module header")]
    InvalidStartSymbol,
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: u32 },
}

/// Structural failure with whatever was counted before it.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct ParseFailure {
    pub kind: FailureKind,
    pub stats: Statistics,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse the file at `path`.
pub fn parse(
    kind: SourceKind,
    path: &Path,
    options: &ParseOptions,
) -> Result<ParseOutput, ParseFailure> {
    let buffer = SourceBuffer::from_path(path).map_err(|err| ParseFailure {
        kind: FailureKind::Source(err),
        stats: Statistics::default(),
        diagnostics: Vec::new(),
    })?;
    tracing::debug!(path = %path.display(), bytes = buffer.len(), "parsing file");
    parse_buffer(kind, &buffer, options)
}

/// Parse in-memory source text.
pub fn parse_source(
    kind: SourceKind,
    source: &str,
    options: &ParseOptions,
) -> Result<ParseOutput, ParseFailure> {
    let buffer = SourceBuffer::new(source);
    parse_buffer(kind, &buffer, options)
}

fn parse_buffer(
    kind: SourceKind,
    buffer: &SourceBuffer,
    options: &ParseOptions,
) -> Result<ParseOutput, ParseFailure> {
    let mut parser = Parser::new(buffer, *options);
    let result = parser.compilation_unit(kind);
    let (stats, diagnostics, interner, trivia) = parser.finish();
    match result {
        Ok(ast) => Ok(ParseOutput {
            ast,
            interner,
            stats,
            diagnostics,
            trivia,
        }),
        Err(kind) => {
            tracing::debug!(%kind, "compilation unit failed");
            Err(ParseFailure {
                kind,
                stats,
                diagnostics,
            })
        }
    }
}
