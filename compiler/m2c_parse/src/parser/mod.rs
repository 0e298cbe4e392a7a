//! Parser state and the matching primitives every production shares.

use m2c_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, Expected, Statistics};
use m2c_ir::{AstKind, AstNode, Name, StringInterner, Token, TokenSet};
use m2c_lexer::{Lexer, Symbol};
use m2c_lexer_core::SourceBuffer;

use crate::recovery::IDENT;
use crate::stack::ensure_sufficient_stack;
use crate::ParseOptions;

/// Raised when nesting exceeds [`ParseOptions::max_nesting`]; unwinds the
/// whole compilation unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NestingTooDeep;

/// Lookahead after a production together with the subtree it built.
pub(crate) type Parsed = Result<(Token, AstNode), NestingTooDeep>;

pub(crate) struct Parser<'src> {
    lexer: Lexer<'src>,
    queue: DiagnosticQueue,
    pub(crate) options: ParseOptions,
    trivia: Vec<Symbol>,
    depth: u32,
    /// Set while parsing a definition module.
    pub(crate) in_definition: bool,
    /// Lookahead and resync set after every skip.
    #[cfg(test)]
    pub(crate) resyncs: Vec<(Token, TokenSet)>,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: &'src SourceBuffer, options: ParseOptions) -> Self {
        let mut parser = Parser {
            lexer: Lexer::new(source, options.lexer),
            queue: DiagnosticQueue::new(),
            options,
            trivia: Vec::new(),
            depth: 0,
            in_definition: false,
            #[cfg(test)]
            resyncs: Vec::new(),
        };
        parser.collect_trivia();
        parser.drain_lexical();
        parser
    }

    /// Statistics, diagnostics, interner and trivia, in that order.
    pub(crate) fn finish(mut self) -> (Statistics, Vec<Diagnostic>, StringInterner, Vec<Symbol>) {
        self.drain_lexical();
        let lines = self.lexer.line_count();
        let (diagnostics, mut stats) = self.queue.into_parts();
        stats.lines = lines;
        (stats, diagnostics, self.lexer.into_interner(), self.trivia)
    }

    // === Lookahead ===

    #[inline]
    pub(crate) fn la(&self) -> Token {
        self.lexer.lookahead().token
    }

    #[inline]
    pub(crate) fn la_symbol(&self) -> Symbol {
        self.lexer.lookahead()
    }

    #[inline]
    pub(crate) fn at(&self, token: Token) -> bool {
        self.la() == token
    }

    #[inline]
    pub(crate) fn at_any(&self, set: &TokenSet) -> bool {
        set.contains(self.la())
    }

    /// Consume the lookahead, returning it.
    pub(crate) fn advance(&mut self) -> Symbol {
        let consumed = self.lexer.lookahead();
        self.lexer.next_sym();
        self.collect_trivia();
        self.drain_lexical();
        consumed
    }

    /// Move comments and pragmas out of the grammar's way.
    fn collect_trivia(&mut self) {
        while self.la().is_non_semantic() {
            self.trivia.push(self.lexer.lookahead());
            self.lexer.next_sym();
        }
    }

    fn drain_lexical(&mut self) {
        let diagnostics = self.lexer.take_diagnostics();
        self.queue.extend(diagnostics);
    }

    // === Matching ===

    /// Consume `expected`, or report it missing and skip to `resync`.
    pub(crate) fn match_token(&mut self, expected: Token, resync: TokenSet) -> bool {
        if self.at(expected) {
            self.advance();
            return true;
        }
        self.unexpected(Expected::Token(expected));
        self.skip_to(resync);
        false
    }

    /// Consume any member of `expected`, or report and skip to `resync`.
    pub(crate) fn match_set(&mut self, expected: TokenSet, resync: TokenSet) -> bool {
        if self.at_any(&expected) {
            self.advance();
            return true;
        }
        self.unexpected(Expected::Set(expected));
        self.skip_to(resync);
        false
    }

    /// Discard symbols until the lookahead is in `resync` or is end of file.
    pub(crate) fn skip_to(&mut self, resync: TokenSet) {
        let mut skipped = 0u32;
        while !self.at(Token::EndOfFile) && !self.at_any(&resync) {
            self.advance();
            skipped += 1;
        }
        tracing::trace!(skipped, resumed_at = %self.la(), "resynchronised");
        #[cfg(test)]
        self.resyncs.push((self.la(), resync));
    }

    // === Diagnostics ===

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = %diagnostic.code,
            line = diagnostic.line,
            column = diagnostic.column,
            "syntax diagnostic"
        );
        self.queue.push(diagnostic);
    }

    /// Diagnostic of `code` positioned at the lookahead.
    pub(crate) fn diagnostic_here(&self, code: ErrorCode) -> Diagnostic {
        let sym = self.la_symbol();
        Diagnostic::new(code, sym.line, sym.column)
    }

    /// Report the lookahead as unexpected.
    pub(crate) fn unexpected(&mut self, expected: Expected) {
        let diagnostic = self.found_here(ErrorCode::E0201).with_expected(expected);
        self.report(diagnostic);
    }

    /// Diagnostic of `code` naming the lookahead symbol and its lexeme.
    pub(crate) fn found_here(&self, code: ErrorCode) -> Diagnostic {
        let sym = self.la_symbol();
        let diagnostic = Diagnostic::new(code, sym.line, sym.column).with_found(sym.token);
        match sym.lexeme {
            Some(name) => diagnostic.with_lexeme(self.lexer.lexeme(name)),
            None => diagnostic,
        }
    }

    /// A `;` at `semicolon` directly before the closing lookahead.
    pub(crate) fn errant_semicolon(&mut self, semicolon: Symbol) {
        let diagnostic = Diagnostic::new(ErrorCode::E0203, semicolon.line, semicolon.column)
            .with_found(self.la())
            .with_severity(self.options.errant_semicolon);
        self.report(diagnostic);
    }

    pub(crate) fn stats_mut(&mut self) -> &mut Statistics {
        self.queue.stats_mut()
    }

    // === Terminals ===

    /// `ident`, or an `EMPTY` placeholder after reporting and skipping.
    pub(crate) fn ident(&mut self, resync: TokenSet) -> (Token, AstNode) {
        if self.at_any(&IDENT) {
            let node = self.leaf(AstKind::Ident);
            return (self.la(), node);
        }
        self.unexpected(Expected::Token(Token::StdIdent));
        self.skip_to(resync);
        (self.la(), AstNode::empty())
    }

    /// Consume the lookahead as a leaf of `kind` carrying its lexeme.
    pub(crate) fn leaf(&mut self, kind: AstKind) -> AstNode {
        let sym = self.advance();
        let name = sym.lexeme.unwrap_or(Name::EMPTY);
        AstNode::leaf(kind, name)
    }

    /// Closing identifier of a module or procedure named `opening`.
    pub(crate) fn closing_ident(&mut self, opening: Option<Name>, resync: TokenSet) {
        if !self.at_any(&IDENT) {
            self.unexpected(Expected::Token(Token::StdIdent));
            self.skip_to(resync);
            return;
        }
        let found = self.la_symbol();
        if let (Some(opening), Some(closing)) = (opening, found.lexeme) {
            if opening != closing {
                let diagnostic = Diagnostic::new(ErrorCode::E0202, found.line, found.column)
                    .with_lexeme(self.lexer.lexeme(closing))
                    .with_expected(Expected::Name(self.lexer.lexeme(opening).to_owned()));
                self.report(diagnostic);
            }
        }
        self.advance();
    }

    // === Nesting ===

    /// Run `production` one level deeper, failing the unit past the limit.
    pub(crate) fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<T, NestingTooDeep>,
    ) -> Result<T, NestingTooDeep> {
        if self.depth >= self.options.max_nesting {
            let diagnostic = self.diagnostic_here(ErrorCode::E0207);
            self.report(diagnostic);
            return Err(NestingTooDeep);
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| production(self));
        self.depth -= 1;
        result
    }
}
