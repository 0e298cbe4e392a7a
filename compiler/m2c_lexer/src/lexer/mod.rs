//! Two-symbol lexer window.
//!
//! The [`Lexer`] holds exactly two symbols: the one just consumed
//! (`current`) and the next one (`lookahead`). [`Lexer::next_sym`] retires
//! `current`, shifts the lookahead into its place and scans a new lookahead.

use m2c_diagnostic::Diagnostic;
use m2c_ir::{Name, StringInterner, Token};
use m2c_lexer_core::SourceBuffer;

use crate::scanner::{RawSymbol, Scanner};
use crate::LexerOptions;

/// A scanned symbol with its interned lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub token: Token,
    /// Present for identifiers, literals, comments, pragmas and malformed
    /// symbols.
    pub lexeme: Option<Name>,
    pub line: u32,
    pub column: u32,
}

impl Symbol {
    /// Placeholder for the window slot before the first symbol.
    const START: Symbol = Symbol {
        token: Token::Unknown,
        lexeme: None,
        line: 0,
        column: 0,
    };
}

pub struct Lexer<'src> {
    scanner: Scanner<'src>,
    interner: StringInterner,
    options: LexerOptions,
    current: Symbol,
    lookahead: Symbol,
    line_count: u32,
}

impl<'src> Lexer<'src> {
    /// Create a lexer over `source` and scan the first lookahead symbol.
    pub fn new(source: &'src SourceBuffer, options: LexerOptions) -> Self {
        let line_count = u32::try_from(source.as_str().lines().count()).unwrap_or(u32::MAX);
        let mut lexer = Lexer {
            scanner: Scanner::new(source.cursor(), options),
            interner: StringInterner::new(),
            options,
            current: Symbol::START,
            lookahead: Symbol::START,
            line_count,
        };
        lexer.lookahead = lexer.scan();
        lexer
    }

    /// Advance the window by one symbol and return the new lookahead token.
    pub fn next_sym(&mut self) -> Token {
        self.current = self.lookahead;
        self.lookahead = self.scan();
        self.lookahead.token
    }

    /// The symbol that will be consumed next.
    #[inline]
    pub fn lookahead(&self) -> Symbol {
        self.lookahead
    }

    /// The most recently consumed symbol.
    #[inline]
    pub fn current(&self) -> Symbol {
        self.current
    }

    /// Text of an interned lexeme.
    #[inline]
    pub fn lexeme(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Intern a string in this lexer's arena.
    pub fn intern(&mut self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// Lexical diagnostics recorded since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.scanner.take_diagnostics()
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> u32 {
        self.line_count
    }

    pub fn options(&self) -> LexerOptions {
        self.options
    }

    /// Release the lexeme arena, ending the lexer's lifetime.
    pub fn into_interner(self) -> StringInterner {
        self.interner
    }

    fn scan(&mut self) -> Symbol {
        let raw = loop {
            let raw = self.scanner.next_symbol();
            if raw.token.is_comment() && !self.options.contains(LexerOptions::PRESERVE_COMMENTS) {
                continue;
            }
            break raw;
        };
        let symbol = self.intern_symbol(raw);
        tracing::trace!(
            token = %symbol.token,
            line = symbol.line,
            column = symbol.column,
            "scanned"
        );
        symbol
    }

    fn intern_symbol(&mut self, raw: RawSymbol) -> Symbol {
        let lexeme = if raw.token.has_lexeme() {
            Some(self.interner.intern(self.scanner.text(&raw)))
        } else {
            None
        };
        Symbol {
            token: raw.token,
            lexeme,
            line: raw.line,
            column: raw.column,
        }
    }
}

/// Every symbol of a source, ending with `EndOfFile`.
#[derive(Debug)]
pub struct Tokenized {
    pub symbols: Vec<Symbol>,
    pub interner: StringInterner,
    pub diagnostics: Vec<Diagnostic>,
}

impl Tokenized {
    /// Text of a symbol's lexeme, or the fixed spelling of its token.
    pub fn text(&self, symbol: &Symbol) -> &str {
        match symbol.lexeme {
            Some(name) => self.interner.lookup(name),
            None => symbol.token.lexeme().unwrap_or(""),
        }
    }
}

/// Scan all of `source` in one go.
pub fn tokenize(source: &str, options: LexerOptions) -> Tokenized {
    let buffer = SourceBuffer::new(source);
    let mut lexer = Lexer::new(&buffer, options);
    let mut symbols = Vec::new();
    loop {
        lexer.next_sym();
        let symbol = lexer.current();
        symbols.push(symbol);
        if symbol.token == Token::EndOfFile {
            break;
        }
    }
    let diagnostics = lexer.take_diagnostics();
    Tokenized {
        symbols,
        interner: lexer.into_interner(),
        diagnostics,
    }
}

#[cfg(test)]
mod tests;
