//! Token vocabulary of the bootstrap dialect.
//!
//! Discriminants are dense and grouped so that every category test is a
//! range check on the `u8` discriminant. The layout is load-bearing: the
//! token set bitmap is indexed by discriminant and sized by [`Token::COUNT`].
//!
//! # Layout
//!
//! | Range | Category |
//! |-------|----------|
//! | `ALIAS ..= WHILE` | reserved words |
//! | `StdIdent ..= ForeignIdent` | identifiers |
//! | `WholeNumber ..= QuotedString` | literals |
//! | `Dot ..= Assign` | punctuation |
//! | `LParen ..= RBrace` | paired delimiters |
//! | `Equal ..= Deref` | symbolic operators, grouped by level |
//! | `EndOfFile` | end of input |
//! | `LineComment ..= Pragma` | non-semantic symbols |
//! | `MalformedIdent ..= MalformedPragma` | malformed symbols |
//! | `Unknown` | invalid sentinel |

use std::fmt;

/// A terminal symbol of the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Token {
    // Reserved words
    Alias,
    And,
    Arglist,
    Array,
    Begin,
    By,
    Case,
    Cast,
    Const,
    Definition,
    Div,
    Do,
    Else,
    Elsif,
    End,
    Exit,
    For,
    From,
    If,
    Implementation,
    Import,
    In,
    Loop,
    Mod,
    Module,
    Not,
    Of,
    Opaque,
    Or,
    Pointer,
    Procedure,
    Record,
    Repeat,
    Return,
    Set,
    Then,
    To,
    Type,
    Until,
    Var,
    While,

    // Identifiers
    StdIdent,
    ForeignIdent,

    // Literals
    WholeNumber,
    RealNumber,
    CharCode,
    QuotedString,

    // Punctuation
    Dot,
    Comma,
    Colon,
    Semicolon,
    Bar,
    DotDot,
    Assign,

    // Paired delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // Level 1 operators
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Identity,
    // Level 2 operators
    Plus,
    Minus,
    // Level 3 operators
    Asterisk,
    Solidus,
    // Level 5 operator
    TypeConv,
    // Level 6 operator
    Deref,

    EndOfFile,

    // Non-semantic
    LineComment,
    BlockComment,
    Pragma,

    // Malformed
    MalformedIdent,
    MalformedNumber,
    MalformedString,
    MalformedComment,
    MalformedPragma,

    Unknown,
}

/// Reserved words paired with their spelling, sorted by spelling.
const RESERVED_WORDS: [(&str, Token); 41] = [
    ("ALIAS", Token::Alias),
    ("AND", Token::And),
    ("ARGLIST", Token::Arglist),
    ("ARRAY", Token::Array),
    ("BEGIN", Token::Begin),
    ("BY", Token::By),
    ("CASE", Token::Case),
    ("CAST", Token::Cast),
    ("CONST", Token::Const),
    ("DEFINITION", Token::Definition),
    ("DIV", Token::Div),
    ("DO", Token::Do),
    ("ELSE", Token::Else),
    ("ELSIF", Token::Elsif),
    ("END", Token::End),
    ("EXIT", Token::Exit),
    ("FOR", Token::For),
    ("FROM", Token::From),
    ("IF", Token::If),
    ("IMPLEMENTATION", Token::Implementation),
    ("IMPORT", Token::Import),
    ("IN", Token::In),
    ("LOOP", Token::Loop),
    ("MOD", Token::Mod),
    ("MODULE", Token::Module),
    ("NOT", Token::Not),
    ("OF", Token::Of),
    ("OPAQUE", Token::Opaque),
    ("OR", Token::Or),
    ("POINTER", Token::Pointer),
    ("PROCEDURE", Token::Procedure),
    ("RECORD", Token::Record),
    ("REPEAT", Token::Repeat),
    ("RETURN", Token::Return),
    ("SET", Token::Set),
    ("THEN", Token::Then),
    ("TO", Token::To),
    ("TYPE", Token::Type),
    ("UNTIL", Token::Until),
    ("VAR", Token::Var),
    ("WHILE", Token::While),
];

impl Token {
    /// Number of tokens in the vocabulary, including the `Unknown` sentinel.
    pub const COUNT: usize = Token::Unknown as usize + 1;

    /// Every token in discriminant order.
    pub const ALL: [Token; Token::COUNT] = [
        Token::Alias,
        Token::And,
        Token::Arglist,
        Token::Array,
        Token::Begin,
        Token::By,
        Token::Case,
        Token::Cast,
        Token::Const,
        Token::Definition,
        Token::Div,
        Token::Do,
        Token::Else,
        Token::Elsif,
        Token::End,
        Token::Exit,
        Token::For,
        Token::From,
        Token::If,
        Token::Implementation,
        Token::Import,
        Token::In,
        Token::Loop,
        Token::Mod,
        Token::Module,
        Token::Not,
        Token::Of,
        Token::Opaque,
        Token::Or,
        Token::Pointer,
        Token::Procedure,
        Token::Record,
        Token::Repeat,
        Token::Return,
        Token::Set,
        Token::Then,
        Token::To,
        Token::Type,
        Token::Until,
        Token::Var,
        Token::While,
        Token::StdIdent,
        Token::ForeignIdent,
        Token::WholeNumber,
        Token::RealNumber,
        Token::CharCode,
        Token::QuotedString,
        Token::Dot,
        Token::Comma,
        Token::Colon,
        Token::Semicolon,
        Token::Bar,
        Token::DotDot,
        Token::Assign,
        Token::LParen,
        Token::RParen,
        Token::LBracket,
        Token::RBracket,
        Token::LBrace,
        Token::RBrace,
        Token::Equal,
        Token::NotEqual,
        Token::Less,
        Token::LessOrEqual,
        Token::Greater,
        Token::GreaterOrEqual,
        Token::Identity,
        Token::Plus,
        Token::Minus,
        Token::Asterisk,
        Token::Solidus,
        Token::TypeConv,
        Token::Deref,
        Token::EndOfFile,
        Token::LineComment,
        Token::BlockComment,
        Token::Pragma,
        Token::MalformedIdent,
        Token::MalformedNumber,
        Token::MalformedString,
        Token::MalformedComment,
        Token::MalformedPragma,
        Token::Unknown,
    ];

    /// Discriminant index, used as the bit position in token sets.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Token for a discriminant index, `None` when out of range.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Token> {
        if index < Token::COUNT {
            Some(Token::ALL[index])
        } else {
            None
        }
    }

    // === Classification ===

    #[inline]
    pub const fn is_reserved_word(self) -> bool {
        (self as u8) <= Token::While as u8
    }

    #[inline]
    pub const fn is_identifier(self) -> bool {
        matches!(self, Token::StdIdent | Token::ForeignIdent)
    }

    /// Whole numbers, real numbers, character codes and quoted strings.
    #[inline]
    pub const fn is_literal(self) -> bool {
        let d = self as u8;
        d >= Token::WholeNumber as u8 && d <= Token::QuotedString as u8
    }

    /// Whole numbers, real numbers and character codes.
    #[inline]
    pub const fn is_number_literal(self) -> bool {
        let d = self as u8;
        d >= Token::WholeNumber as u8 && d <= Token::CharCode as u8
    }

    /// Punctuation, delimiters and symbolic operators.
    #[inline]
    pub const fn is_special_symbol(self) -> bool {
        let d = self as u8;
        d >= Token::Dot as u8 && d <= Token::Deref as u8
    }

    #[inline]
    pub const fn is_oper_l1(self) -> bool {
        let d = self as u8;
        (d >= Token::Equal as u8 && d <= Token::Identity as u8) || d == Token::In as u8
    }

    #[inline]
    pub const fn is_oper_l2(self) -> bool {
        matches!(self, Token::Plus | Token::Minus | Token::Or)
    }

    #[inline]
    pub const fn is_oper_l3(self) -> bool {
        matches!(
            self,
            Token::Asterisk | Token::Solidus | Token::Div | Token::Mod | Token::And
        )
    }

    #[inline]
    pub const fn is_oper_l4(self) -> bool {
        matches!(self, Token::Not)
    }

    #[inline]
    pub const fn is_oper_l5(self) -> bool {
        matches!(self, Token::TypeConv)
    }

    #[inline]
    pub const fn is_oper_l6(self) -> bool {
        matches!(self, Token::Deref)
    }

    /// Membership in operator level `level` (1 through 6).
    ///
    /// Any other level answers `false`.
    pub const fn is_operator_at_level(self, level: u8) -> bool {
        match level {
            1 => self.is_oper_l1(),
            2 => self.is_oper_l2(),
            3 => self.is_oper_l3(),
            4 => self.is_oper_l4(),
            5 => self.is_oper_l5(),
            6 => self.is_oper_l6(),
            _ => false,
        }
    }

    /// Precedence level of an operator token, `None` for non-operators.
    pub const fn operator_level(self) -> Option<u8> {
        if self.is_oper_l1() {
            Some(1)
        } else if self.is_oper_l2() {
            Some(2)
        } else if self.is_oper_l3() {
            Some(3)
        } else if self.is_oper_l4() {
            Some(4)
        } else if self.is_oper_l5() {
            Some(5)
        } else if self.is_oper_l6() {
            Some(6)
        } else {
            None
        }
    }

    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(self, Token::LineComment | Token::BlockComment)
    }

    #[inline]
    pub const fn is_pragma(self) -> bool {
        matches!(self, Token::Pragma)
    }

    #[inline]
    pub const fn is_malformed(self) -> bool {
        let d = self as u8;
        d >= Token::MalformedIdent as u8 && d <= Token::MalformedPragma as u8
    }

    /// Symbols the grammar never sees: comments, pragmas and their
    /// malformed variants.
    #[inline]
    pub const fn is_non_semantic(self) -> bool {
        let d = self as u8;
        (d >= Token::LineComment as u8 && d <= Token::Pragma as u8)
            || matches!(self, Token::MalformedComment | Token::MalformedPragma)
    }

    /// Whether a symbol of this kind carries an interned lexeme.
    #[inline]
    pub const fn has_lexeme(self) -> bool {
        let d = self as u8;
        (d >= Token::StdIdent as u8 && d <= Token::QuotedString as u8)
            || (d >= Token::LineComment as u8 && d <= Token::MalformedPragma as u8)
    }

    // === Lookups ===

    /// Canonical display name.
    pub const fn name(self) -> &'static str {
        match self {
            Token::Alias => "ALIAS",
            Token::And => "AND",
            Token::Arglist => "ARGLIST",
            Token::Array => "ARRAY",
            Token::Begin => "BEGIN",
            Token::By => "BY",
            Token::Case => "CASE",
            Token::Cast => "CAST",
            Token::Const => "CONST",
            Token::Definition => "DEFINITION",
            Token::Div => "DIV",
            Token::Do => "DO",
            Token::Else => "ELSE",
            Token::Elsif => "ELSIF",
            Token::End => "END",
            Token::Exit => "EXIT",
            Token::For => "FOR",
            Token::From => "FROM",
            Token::If => "IF",
            Token::Implementation => "IMPLEMENTATION",
            Token::Import => "IMPORT",
            Token::In => "IN",
            Token::Loop => "LOOP",
            Token::Mod => "MOD",
            Token::Module => "MODULE",
            Token::Not => "NOT",
            Token::Of => "OF",
            Token::Opaque => "OPAQUE",
            Token::Or => "OR",
            Token::Pointer => "POINTER",
            Token::Procedure => "PROCEDURE",
            Token::Record => "RECORD",
            Token::Repeat => "REPEAT",
            Token::Return => "RETURN",
            Token::Set => "SET",
            Token::Then => "THEN",
            Token::To => "TO",
            Token::Type => "TYPE",
            Token::Until => "UNTIL",
            Token::Var => "VAR",
            Token::While => "WHILE",
            Token::StdIdent => "STDIDENT",
            Token::ForeignIdent => "FOREIGNIDENT",
            Token::WholeNumber => "WHOLENUM",
            Token::RealNumber => "REALNUM",
            Token::CharCode => "CHARCODE",
            Token::QuotedString => "QUOTEDSTR",
            Token::Dot => "DOT",
            Token::Comma => "COMMA",
            Token::Colon => "COLON",
            Token::Semicolon => "SEMICOLON",
            Token::Bar => "BAR",
            Token::DotDot => "DOTDOT",
            Token::Assign => "ASSIGN",
            Token::LParen => "LPAREN",
            Token::RParen => "RPAREN",
            Token::LBracket => "LBRACKET",
            Token::RBracket => "RBRACKET",
            Token::LBrace => "LBRACE",
            Token::RBrace => "RBRACE",
            Token::Equal => "EQUAL",
            Token::NotEqual => "NOTEQUAL",
            Token::Less => "LESS",
            Token::LessOrEqual => "LESSEQ",
            Token::Greater => "GREATER",
            Token::GreaterOrEqual => "GREATEREQ",
            Token::Identity => "IDENTITY",
            Token::Plus => "PLUS",
            Token::Minus => "MINUS",
            Token::Asterisk => "ASTERISK",
            Token::Solidus => "SOLIDUS",
            Token::TypeConv => "TYPECONV",
            Token::Deref => "DEREF",
            Token::EndOfFile => "EOF",
            Token::LineComment => "LINECOMMENT",
            Token::BlockComment => "BLOCKCOMMENT",
            Token::Pragma => "PRAGMA",
            Token::MalformedIdent => "MALFORMED_IDENT",
            Token::MalformedNumber => "MALFORMED_NUMBER",
            Token::MalformedString => "MALFORMED_STRING",
            Token::MalformedComment => "MALFORMED_COMMENT",
            Token::MalformedPragma => "MALFORMED_PRAGMA",
            Token::Unknown => "UNKNOWN",
        }
    }

    /// Fixed spelling of a reserved word or special symbol.
    pub const fn lexeme(self) -> Option<&'static str> {
        if self.is_reserved_word() {
            return Some(self.name());
        }
        match self {
            Token::Dot => Some("."),
            Token::Comma => Some(","),
            Token::Colon => Some(":"),
            Token::Semicolon => Some(";"),
            Token::Bar => Some("|"),
            Token::DotDot => Some(".."),
            Token::Assign => Some(":="),
            Token::LParen => Some("("),
            Token::RParen => Some(")"),
            Token::LBracket => Some("["),
            Token::RBracket => Some("]"),
            Token::LBrace => Some("{"),
            Token::RBrace => Some("}"),
            Token::Equal => Some("="),
            Token::NotEqual => Some("#"),
            Token::Less => Some("<"),
            Token::LessOrEqual => Some("<="),
            Token::Greater => Some(">"),
            Token::GreaterOrEqual => Some(">="),
            Token::Identity => Some("=="),
            Token::Plus => Some("+"),
            Token::Minus => Some("-"),
            Token::Asterisk => Some("*"),
            Token::Solidus => Some("/"),
            Token::TypeConv => Some("::"),
            Token::Deref => Some("^"),
            _ => None,
        }
    }

    /// Human-readable description for diagnostics.
    ///
    /// Fixed-spelling tokens render as their spelling in backquotes,
    /// lexeme-carrying tokens as a category word.
    pub fn describe(self) -> String {
        match self.lexeme() {
            Some(text) => format!("`{text}`"),
            None => match self {
                Token::StdIdent | Token::ForeignIdent => "identifier".to_owned(),
                Token::WholeNumber => "whole number".to_owned(),
                Token::RealNumber => "real number".to_owned(),
                Token::CharCode => "character code".to_owned(),
                Token::QuotedString => "quoted string".to_owned(),
                Token::EndOfFile => "end of file".to_owned(),
                Token::LineComment | Token::BlockComment => "comment".to_owned(),
                Token::Pragma => "pragma".to_owned(),
                other => other.name().to_ascii_lowercase().replace('_', " "),
            },
        }
    }

    /// Reserved word spelled exactly `text`.
    pub fn reserved_word(text: &str) -> Option<Token> {
        RESERVED_WORDS
            .binary_search_by(|(word, _)| (*word).cmp(text))
            .ok()
            .map(|i| RESERVED_WORDS[i].1)
    }

    /// Special symbol spelled exactly `text`.
    pub fn special_symbol(text: &str) -> Option<Token> {
        let token = match text {
            "." => Token::Dot,
            "," => Token::Comma,
            ":" => Token::Colon,
            ";" => Token::Semicolon,
            "|" => Token::Bar,
            ".." => Token::DotDot,
            ":=" => Token::Assign,
            "(" => Token::LParen,
            ")" => Token::RParen,
            "[" => Token::LBracket,
            "]" => Token::RBracket,
            "{" => Token::LBrace,
            "}" => Token::RBrace,
            "=" => Token::Equal,
            "#" => Token::NotEqual,
            "<" => Token::Less,
            "<=" => Token::LessOrEqual,
            ">" => Token::Greater,
            ">=" => Token::GreaterOrEqual,
            "==" => Token::Identity,
            "+" => Token::Plus,
            "-" => Token::Minus,
            "*" => Token::Asterisk,
            "/" => Token::Solidus,
            "::" => Token::TypeConv,
            "^" => Token::Deref,
            _ => return None,
        };
        Some(token)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
