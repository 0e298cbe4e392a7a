//! Diagnostic codes.
//!
//! Format `E####`; the second digit names the phase:
//! - E01xx: lexical diagnostics
//! - E02xx: syntax diagnostics
//! - E03xx: semantic diagnostics (reserved for later passes)

use std::fmt;

use crate::Severity;

/// Compiler phase a diagnostic belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Lexical,
    Syntax,
    Semantic,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical (E01xx)
    /// Character outside the vocabulary
    E0101,
    /// Quoted literal not closed before end of file
    E0102,
    /// Block comment not closed before end of file
    E0103,
    /// Pragma not closed before end of file
    E0104,
    /// Disabled code block not closed before end of file (warning)
    E0105,
    /// Invalid escape sequence in quoted literal
    E0106,
    /// Control character in quoted literal
    E0107,
    /// Digit separator not followed by a digit
    E0108,
    /// Decimal point not followed by a digit
    E0109,
    /// Exponent marker not followed by a digit
    E0110,
    /// Malformed number literal
    E0111,
    /// Malformed identifier
    E0112,
    /// Block comment nested too deeply
    E0113,

    // Syntax (E02xx)
    /// Unexpected symbol
    E0201,
    /// Closing identifier does not match the opening one
    E0202,
    /// Semicolon before a closing symbol
    E0203,
    /// Empty statement sequence (warning)
    E0204,
    /// Empty field list sequence (warning)
    E0205,
    /// OPAQUE outside a definition module
    E0206,
    /// Nesting limit exceeded (fatal)
    E0207,
    /// Compilation unit does not start with the expected symbol (fatal)
    E0208,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0101 => "E0101",
            ErrorCode::E0102 => "E0102",
            ErrorCode::E0103 => "E0103",
            ErrorCode::E0104 => "E0104",
            ErrorCode::E0105 => "E0105",
            ErrorCode::E0106 => "E0106",
            ErrorCode::E0107 => "E0107",
            ErrorCode::E0108 => "E0108",
            ErrorCode::E0109 => "E0109",
            ErrorCode::E0110 => "E0110",
            ErrorCode::E0111 => "E0111",
            ErrorCode::E0112 => "E0112",
            ErrorCode::E0113 => "E0113",
            ErrorCode::E0201 => "E0201",
            ErrorCode::E0202 => "E0202",
            ErrorCode::E0203 => "E0203",
            ErrorCode::E0204 => "E0204",
            ErrorCode::E0205 => "E0205",
            ErrorCode::E0206 => "E0206",
            ErrorCode::E0207 => "E0207",
            ErrorCode::E0208 => "E0208",
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            ErrorCode::E0101
            | ErrorCode::E0102
            | ErrorCode::E0103
            | ErrorCode::E0104
            | ErrorCode::E0105
            | ErrorCode::E0106
            | ErrorCode::E0107
            | ErrorCode::E0108
            | ErrorCode::E0109
            | ErrorCode::E0110
            | ErrorCode::E0111
            | ErrorCode::E0112
            | ErrorCode::E0113 => Phase::Lexical,
            ErrorCode::E0201
            | ErrorCode::E0202
            | ErrorCode::E0203
            | ErrorCode::E0204
            | ErrorCode::E0205
            | ErrorCode::E0206
            | ErrorCode::E0207
            | ErrorCode::E0208 => Phase::Syntax,
        }
    }

    /// Severity a diagnostic with this code gets unless configured otherwise.
    pub fn default_severity(&self) -> Severity {
        match self {
            ErrorCode::E0105 | ErrorCode::E0204 | ErrorCode::E0205 => Severity::Warning,
            ErrorCode::E0207 | ErrorCode::E0208 => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Short description used when a diagnostic carries no further detail.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0101 => "illegal character",
            ErrorCode::E0102 => "unterminated quoted literal",
            ErrorCode::E0103 => "unterminated block comment",
            ErrorCode::E0104 => "unterminated pragma",
            ErrorCode::E0105 => "disabled code block not closed before end of file",
            ErrorCode::E0106 => "invalid escape sequence",
            ErrorCode::E0107 => "control character in quoted literal",
            ErrorCode::E0108 => "digit separator must be followed by a digit",
            ErrorCode::E0109 => "decimal point must be followed by a digit",
            ErrorCode::E0110 => "exponent must contain at least one digit",
            ErrorCode::E0111 => "malformed number literal",
            ErrorCode::E0112 => "malformed identifier",
            ErrorCode::E0113 => "block comment nesting limit exceeded",
            ErrorCode::E0201 => "unexpected symbol",
            ErrorCode::E0202 => "closing identifier does not match",
            ErrorCode::E0203 => "semicolon before closing symbol",
            ErrorCode::E0204 => "empty statement sequence",
            ErrorCode::E0205 => "empty field list sequence",
            ErrorCode::E0206 => "OPAQUE is only permitted in definition modules",
            ErrorCode::E0207 => "nesting limit exceeded",
            ErrorCode::E0208 => "invalid start of compilation unit",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
