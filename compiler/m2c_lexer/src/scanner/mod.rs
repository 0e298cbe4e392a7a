//! Character-level state machine.
//!
//! Each call to [`Scanner::next_symbol`] skips whitespace and disabled code,
//! then recognizes exactly one symbol or end of file. Stray characters are
//! reported and skipped inside the same call, so the caller always gets a
//! symbol back.
//!
//! Errors never abort scanning: each is recorded as a [`Diagnostic`] and the
//! affected symbol is still produced, as a malformed token where the text
//! cannot stand for anything in the vocabulary.

use m2c_diagnostic::{Diagnostic, ErrorCode};
use m2c_ir::Token;
use m2c_lexer_core::Cursor;

use crate::LexerOptions;

/// Maximum nesting depth of block comments.
pub const MAX_COMMENT_NESTING: u32 = 10;

/// One recognized symbol before its lexeme is interned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSymbol {
    pub token: Token,
    /// Byte offset of the first character.
    pub start: u32,
    /// Byte offset one past the last character.
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Base {
    Binary,
    Decimal,
    Hex,
}

impl Base {
    #[inline]
    fn is_digit(self, b: u8) -> bool {
        match self {
            Base::Binary => matches!(b, b'0' | b'1'),
            Base::Decimal => b.is_ascii_digit(),
            Base::Hex => matches!(b, b'0'..=b'9' | b'A'..=b'F'),
        }
    }
}

pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    options: LexerOptions,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Scanner<'a> {
    pub fn new(cursor: Cursor<'a>, options: LexerOptions) -> Self {
        Scanner {
            cursor,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Source text of a recognized symbol.
    pub fn text(&self, symbol: &RawSymbol) -> &'a str {
        self.cursor.slice(symbol.start, symbol.end)
    }

    /// Diagnostics recorded since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Recognize the next symbol. At end of input this returns
    /// `EndOfFile` on every call.
    pub fn next_symbol(&mut self) -> RawSymbol {
        loop {
            self.cursor.eat_whitespace();
            let start = self.cursor.pos();
            let line = self.cursor.line();
            let column = self.cursor.column();
            let word = self.cursor.current().is_ascii_alphabetic();

            let token = match self.cursor.current() {
                0 if self.cursor.is_eof() => Token::EndOfFile,
                b'a'..=b'z' | b'A'..=b'Z' => self.identifier(line, column),
                b'_' | b'$' if self.options.allows_ident_separator(self.cursor.current()) => {
                    self.leading_separator(line, column)
                }
                b'0'..=b'9' => self.number(line, column),
                b'\'' | b'"' => self.quoted_literal(line, column),
                b'!' => {
                    self.cursor.eat_until_newline_or_eof();
                    Token::LineComment
                }
                b'(' if self.cursor.peek() == b'*' => self.block_comment(line, column),
                b'<' if self.cursor.peek() == b'*' => self.pragma(line, column),
                b'?' if self.cursor.at_line_start() && self.cursor.peek() == b'<' => {
                    self.disabled_code(line, column);
                    continue;
                }
                b'.' => self.one_or_two(b'.', Token::Dot, Token::DotDot),
                b':' => match self.cursor.peek() {
                    b'=' => self.double(Token::Assign),
                    b':' => self.double(Token::TypeConv),
                    _ => self.single(Token::Colon),
                },
                b'<' => self.one_or_two(b'=', Token::Less, Token::LessOrEqual),
                b'>' => self.one_or_two(b'=', Token::Greater, Token::GreaterOrEqual),
                b'=' => self.one_or_two(b'=', Token::Equal, Token::Identity),
                b',' => self.single(Token::Comma),
                b';' => self.single(Token::Semicolon),
                b'|' => self.single(Token::Bar),
                b'(' => self.single(Token::LParen),
                b')' => self.single(Token::RParen),
                b'[' => self.single(Token::LBracket),
                b']' => self.single(Token::RBracket),
                b'{' => self.single(Token::LBrace),
                b'}' => self.single(Token::RBrace),
                b'#' => self.single(Token::NotEqual),
                b'+' => self.single(Token::Plus),
                b'-' => self.single(Token::Minus),
                b'*' => self.single(Token::Asterisk),
                b'/' => self.single(Token::Solidus),
                b'^' => self.single(Token::Deref),
                _ => {
                    self.illegal_char();
                    continue;
                }
            };

            let symbol = RawSymbol {
                token,
                start,
                end: self.cursor.pos(),
                line,
                column,
            };
            // A digit separator cannot follow an identifier. Skipping it here
            // keeps it out of the symbol and stops it opening a string.
            if word && self.cursor.current() == b'\'' {
                self.illegal_char();
            }
            return symbol;
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = %diagnostic.code,
            line = diagnostic.line,
            column = diagnostic.column,
            "lexical diagnostic"
        );
        self.diagnostics.push(diagnostic);
    }

    fn report_here(&mut self, code: ErrorCode) {
        let diagnostic = Diagnostic::new(code, self.cursor.line(), self.cursor.column());
        self.report(diagnostic);
    }

    // ─── Special Symbols ─────────────────────────────────────────────

    #[inline]
    fn single(&mut self, token: Token) -> Token {
        self.cursor.advance();
        token
    }

    #[inline]
    fn double(&mut self, token: Token) -> Token {
        self.cursor.advance_n(2);
        token
    }

    /// `one` alone, or `two` when the next byte is `second`.
    fn one_or_two(&mut self, second: u8, one: Token, two: Token) -> Token {
        if self.cursor.peek() == second {
            self.double(two)
        } else {
            self.single(one)
        }
    }

    fn illegal_char(&mut self) {
        let c = self.cursor.current_char().unwrap_or('\0');
        let diagnostic =
            Diagnostic::new(ErrorCode::E0101, self.cursor.line(), self.cursor.column()).with_char(c);
        self.report(diagnostic);
        self.cursor.advance_char();
    }

    // ─── Identifiers ─────────────────────────────────────────────────

    /// Identifier or reserved word.
    ///
    /// Only an all-uppercase run of letters can be a reserved word; a miss in
    /// the reserved-word table makes it an ordinary identifier.
    fn identifier(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.pos();
        let shape = self.eat_identifier_tail();

        let token = if shape.malformed {
            let diagnostic = Diagnostic::new(ErrorCode::E0112, line, column)
                .with_lexeme(self.cursor.slice_from(start));
            self.report(diagnostic);
            Token::MalformedIdent
        } else if shape.all_upper {
            Token::reserved_word(self.cursor.slice_from(start)).unwrap_or(Token::StdIdent)
        } else if shape.foreign {
            Token::ForeignIdent
        } else {
            Token::StdIdent
        };

        token
    }

    /// `_` or `$` where an identifier would start: never valid, but the
    /// whole extent is taken as one malformed identifier.
    fn leading_separator(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.pos();
        self.eat_identifier_tail();
        let diagnostic =
            Diagnostic::new(ErrorCode::E0112, line, column).with_lexeme(self.cursor.slice_from(start));
        self.report(diagnostic);
        Token::MalformedIdent
    }

    fn eat_identifier_tail(&mut self) -> IdentShape {
        let mut shape = IdentShape {
            all_upper: true,
            foreign: false,
            malformed: false,
        };
        let mut after_separator = false;
        let mut first = true;
        loop {
            let b = self.cursor.current();
            if b.is_ascii_alphanumeric() {
                shape.all_upper &= b.is_ascii_uppercase();
                after_separator = false;
            } else if self.options.allows_ident_separator(b) {
                shape.all_upper = false;
                shape.foreign = true;
                // leading or doubled
                shape.malformed |= first || after_separator;
                after_separator = true;
            } else {
                break;
            }
            first = false;
            self.cursor.advance();
        }
        // trailing
        shape.malformed |= after_separator;
        shape
    }

    // ─── Numbers ─────────────────────────────────────────────────────

    fn number(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.pos();
        let token = if self.cursor.current() == b'0' {
            match self.cursor.peek() {
                b'.' if self.cursor.peek2() != b'.' => {
                    self.cursor.advance();
                    self.real_tail()
                }
                b'b' => self.prefixed(Base::Binary, Token::WholeNumber),
                b'x' => self.prefixed(Base::Hex, Token::WholeNumber),
                b'u' => self.prefixed(Base::Hex, Token::CharCode),
                b if b.is_ascii_alphanumeric() => {
                    self.cursor.advance();
                    Token::MalformedNumber
                }
                _ => self.single(Token::WholeNumber),
            }
        } else {
            self.digit_sequence(Base::Decimal);
            if self.cursor.current() == b'.' && self.cursor.peek() != b'.' {
                self.real_tail()
            } else {
                Token::WholeNumber
            }
        };

        let trailing_junk = self.cursor.current().is_ascii_alphanumeric();
        if token == Token::MalformedNumber || trailing_junk {
            self.cursor.eat_while(|b| b.is_ascii_alphanumeric());
            let diagnostic = Diagnostic::new(ErrorCode::E0111, line, column)
                .with_lexeme(self.cursor.slice_from(start));
            self.report(diagnostic);
            return Token::MalformedNumber;
        }
        token
    }

    /// `0b`, `0x` or `0u` followed by digits of `base`.
    fn prefixed(&mut self, base: Base, token: Token) -> Token {
        self.cursor.advance_n(2);
        if base.is_digit(self.cursor.current()) {
            self.digit_sequence(base);
            token
        } else {
            Token::MalformedNumber
        }
    }

    /// Digits of `base` with single apostrophe separators, each of which
    /// must be followed by a digit.
    fn digit_sequence(&mut self, base: Base) {
        loop {
            let b = self.cursor.current();
            if base.is_digit(b) {
                self.cursor.advance();
            } else if b == b'\'' {
                self.cursor.advance();
                if !base.is_digit(self.cursor.current()) {
                    self.report_here(ErrorCode::E0108);
                    return;
                }
            } else {
                return;
            }
        }
    }

    /// Fraction and optional exponent; the cursor is on the decimal point.
    fn real_tail(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current().is_ascii_digit() {
            self.digit_sequence(Base::Decimal);
        } else {
            self.report_here(ErrorCode::E0109);
        }

        if matches!(self.cursor.current(), b'e' | b'E') {
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            if self.cursor.current().is_ascii_digit() {
                self.digit_sequence(Base::Decimal);
            } else {
                self.report_here(ErrorCode::E0110);
            }
        }
        Token::RealNumber
    }

    // ─── Quoted Literals ─────────────────────────────────────────────

    /// Literal delimited by `'` or `"`. Only `\n` and `\t` are escapes;
    /// the delimiter always terminates the literal.
    fn quoted_literal(&mut self, line: u32, column: u32) -> Token {
        let delimiter = self.cursor.current();
        self.cursor.advance();
        loop {
            if self.cursor.is_eof() {
                self.report(Diagnostic::new(ErrorCode::E0102, line, column));
                return Token::MalformedString;
            }
            let b = self.cursor.current();
            if b == delimiter {
                self.cursor.advance();
                return Token::QuotedString;
            }
            match b {
                b'\\' => {
                    let (esc_line, esc_column) = (self.cursor.line(), self.cursor.column());
                    self.cursor.advance();
                    if matches!(self.cursor.current(), b'n' | b't') {
                        self.cursor.advance();
                    } else {
                        let mut diagnostic = Diagnostic::new(ErrorCode::E0106, esc_line, esc_column);
                        if let Some(c) = self.cursor.current_char() {
                            diagnostic = diagnostic.with_char(c);
                        }
                        self.report(diagnostic);
                    }
                }
                0x00..=0x1F | 0x7F => {
                    let diagnostic =
                        Diagnostic::new(ErrorCode::E0107, self.cursor.line(), self.cursor.column())
                            .with_char(char::from(b));
                    self.report(diagnostic);
                    self.cursor.advance();
                }
                _ => self.cursor.advance_char(),
            }
        }
    }

    // ─── Comments and Pragmas ────────────────────────────────────────

    /// `(* ... *)` with nesting up to [`MAX_COMMENT_NESTING`]; deeper
    /// openers are reported once and read as comment text, and so are the
    /// closers that pair with them.
    fn block_comment(&mut self, line: u32, column: u32) -> Token {
        self.cursor.advance_n(2);
        let mut depth = 1;
        let mut ignored = 0u32;
        let mut limit_reported = false;
        loop {
            if self.cursor.is_eof() {
                self.report(Diagnostic::new(ErrorCode::E0103, line, column));
                return Token::MalformedComment;
            }
            match (self.cursor.current(), self.cursor.peek()) {
                (b'(', b'*') => {
                    if depth < MAX_COMMENT_NESTING {
                        depth += 1;
                    } else {
                        ignored += 1;
                        if !limit_reported {
                            self.report_here(ErrorCode::E0113);
                            limit_reported = true;
                        }
                    }
                    self.cursor.advance_n(2);
                }
                (b'*', b')') => {
                    self.cursor.advance_n(2);
                    if ignored > 0 {
                        ignored -= 1;
                        continue;
                    }
                    depth -= 1;
                    if depth == 0 {
                        return Token::BlockComment;
                    }
                }
                _ => self.cursor.advance_char(),
            }
        }
    }

    /// `<* ... *>`, not nested.
    fn pragma(&mut self, line: u32, column: u32) -> Token {
        self.cursor.advance_n(2);
        loop {
            if self.cursor.is_eof() {
                self.report(Diagnostic::new(ErrorCode::E0104, line, column));
                return Token::MalformedPragma;
            }
            if self.cursor.current() == b'*' && self.cursor.peek() == b'>' {
                self.cursor.advance_n(2);
                return Token::Pragma;
            }
            self.cursor.advance_char();
        }
    }

    /// Skip from `?<` at column 1 through the line starting with `?>`.
    fn disabled_code(&mut self, line: u32, column: u32) {
        if self.cursor.skip_to_line_starting_with(b'?', b'>') {
            self.cursor.eat_until_newline_or_eof();
        } else {
            self.report(Diagnostic::new(ErrorCode::E0105, line, column));
        }
    }
}

struct IdentShape {
    all_upper: bool,
    foreign: bool,
    malformed: bool,
}

#[cfg(test)]
mod tests;
