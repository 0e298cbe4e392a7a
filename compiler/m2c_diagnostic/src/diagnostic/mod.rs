//! Diagnostic records.
//!
//! A diagnostic is plain data: position, code, severity and whatever the
//! reporting site knew about the offending input. Text is composed only
//! when a message is rendered.

use std::fmt;

use m2c_ir::{Token, TokenSet};

use crate::{ErrorCode, Phase};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    /// Terminates the compilation unit.
    Fatal,
    Error,
    Warning,
}

impl Severity {
    /// Fatal diagnostics count as errors.
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Fatal | Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "fatal"),
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What the reporting site expected instead.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Expected {
    Token(Token),
    Set(TokenSet),
    /// An identifier spelled exactly like this.
    Name(String),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(token) => f.write_str(&token.describe()),
            Expected::Set(set) => f.write_str(&set.phrase()),
            Expected::Name(name) => write!(f, "`{name}`"),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
    pub offending_char: Option<char>,
    /// Token found at the reported position.
    pub found: Option<Token>,
    /// Source text of the offending symbol.
    pub lexeme: Option<String>,
    pub expected: Option<Expected>,
}

impl Diagnostic {
    /// Diagnostic with the code's default severity.
    pub fn new(code: ErrorCode, line: u32, column: u32) -> Self {
        Diagnostic {
            severity: code.default_severity(),
            code,
            line,
            column,
            offending_char: None,
            found: None,
            lexeme: None,
            expected: None,
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn with_char(mut self, c: char) -> Self {
        self.offending_char = Some(c);
        self
    }

    #[must_use]
    pub fn with_found(mut self, token: Token) -> Self {
        self.found = Some(token);
        self
    }

    #[must_use]
    pub fn with_lexeme(mut self, lexeme: impl Into<String>) -> Self {
        self.lexeme = Some(lexeme.into());
        self
    }

    #[must_use]
    pub fn with_expected(mut self, expected: Expected) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn phase(&self) -> Phase {
        self.code.phase()
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// Human-readable message built from the code and the recorded fields.
    pub fn message(&self) -> String {
        match self.code {
            ErrorCode::E0101 | ErrorCode::E0107 => match self.offending_char {
                Some(c) => format!("{} '{}'", self.code.description(), c.escape_debug()),
                None => self.code.description().to_owned(),
            },
            ErrorCode::E0106 => match self.offending_char {
                Some(c) => format!("invalid escape sequence '\\{}'", c.escape_debug()),
                None => self.code.description().to_owned(),
            },
            ErrorCode::E0201 => {
                let found = self.found_text();
                match &self.expected {
                    Some(expected) => format!("unexpected {found}, expected {expected}"),
                    None => format!("unexpected {found}"),
                }
            }
            ErrorCode::E0202 => match (&self.lexeme, &self.expected) {
                (Some(found), Some(expected)) => {
                    format!("closing identifier `{found}` does not match {expected}")
                }
                _ => self.code.description().to_owned(),
            },
            ErrorCode::E0203 => match self.found {
                Some(token) => format!("semicolon before {}", token.describe()),
                None => self.code.description().to_owned(),
            },
            ErrorCode::E0208 => match &self.expected {
                Some(expected) => format!(
                    "{}: found {}, expected {expected}",
                    self.code.description(),
                    self.found_text()
                ),
                None => self.code.description().to_owned(),
            },
            _ => match &self.lexeme {
                Some(lexeme) if self.code.phase() == Phase::Lexical => {
                    format!("{} `{lexeme}`", self.code.description())
                }
                _ => self.code.description().to_owned(),
            },
        }
    }

    fn found_text(&self) -> String {
        match (&self.lexeme, self.found) {
            (Some(lexeme), Some(token)) => format!("{} `{lexeme}`", token.describe()),
            (None, Some(token)) => token.describe(),
            (Some(lexeme), None) => format!("`{lexeme}`"),
            (None, None) => "symbol".to_owned(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}[{}]: {}",
            self.line,
            self.column,
            self.severity,
            self.code,
            self.message()
        )
    }
}

#[cfg(test)]
mod tests;
