//! Grammar sets for prediction and panic-mode recovery.
//!
//! Every set is built at compile time. FIRST sets drive prediction; FOLLOW
//! sets bound recovery. `EndOfFile` is a member of every FOLLOW set, so a
//! resynchronising skip always terminates.

use m2c_ir::{Token, TokenSet};

// === FIRST Sets ===

/// Tokens that can stand where an identifier is expected. Malformed
/// identifiers are accepted so a lexical error is not reported twice.
pub const IDENT: TokenSet =
    TokenSet::from_list(&[Token::StdIdent, Token::ForeignIdent, Token::MalformedIdent]);

pub const FIRST_COMPILATION_UNIT: TokenSet =
    TokenSet::from_list(&[Token::Definition, Token::Implementation, Token::Module]);

pub const FIRST_PROGRAM_UNIT: TokenSet =
    TokenSet::from_list(&[Token::Implementation, Token::Module]);

pub const FIRST_IMPORT: TokenSet = TokenSet::from_list(&[Token::Import, Token::From]);

pub const FIRST_DECLARATION: TokenSet =
    TokenSet::from_list(&[Token::Const, Token::Type, Token::Var, Token::Procedure]);

pub const FIRST_TYPE: TokenSet = TokenSet::union_of(&[
    IDENT,
    TokenSet::from_list(&[
        Token::Alias,
        Token::LBracket,
        Token::LParen,
        Token::Set,
        Token::Array,
        Token::Record,
        Token::Pointer,
        Token::Procedure,
    ]),
]);

pub const FIRST_FORMAL_TYPE: TokenSet = TokenSet::union_of(&[
    IDENT,
    TokenSet::from_list(&[Token::Arglist, Token::Cast, Token::Array]),
]);

pub const FIRST_FIELD_LIST: TokenSet = IDENT.with(Token::Case);

pub const FIRST_STATEMENT: TokenSet = TokenSet::union_of(&[
    IDENT,
    TokenSet::from_list(&[
        Token::If,
        Token::Case,
        Token::Loop,
        Token::While,
        Token::Repeat,
        Token::For,
        Token::Return,
        Token::Exit,
    ]),
]);

pub const LITERAL: TokenSet = TokenSet::from_list(&[
    Token::WholeNumber,
    Token::RealNumber,
    Token::CharCode,
    Token::QuotedString,
    Token::MalformedNumber,
    Token::MalformedString,
]);

pub const FIRST_EXPRESSION: TokenSet = TokenSet::union_of(&[
    IDENT,
    LITERAL,
    TokenSet::from_list(&[
        Token::LBrace,
        Token::LParen,
        Token::Plus,
        Token::Minus,
        Token::Not,
    ]),
]);

pub const OPER_L1: TokenSet = TokenSet::from_list(&[
    Token::Equal,
    Token::NotEqual,
    Token::Less,
    Token::LessOrEqual,
    Token::Greater,
    Token::GreaterOrEqual,
    Token::Identity,
    Token::In,
]);

pub const OPER_L2: TokenSet = TokenSet::from_list(&[Token::Plus, Token::Minus, Token::Or]);

pub const OPER_L3: TokenSet = TokenSet::from_list(&[
    Token::Asterisk,
    Token::Solidus,
    Token::Div,
    Token::Mod,
    Token::And,
]);

// === FOLLOW Sets ===

const EOF: TokenSet = TokenSet::from_list(&[Token::EndOfFile]);

/// Symbols that close a statement sequence.
pub const STATEMENT_SEQUENCE_END: TokenSet = TokenSet::from_list(&[
    Token::End,
    Token::Elsif,
    Token::Else,
    Token::Until,
    Token::Bar,
    Token::EndOfFile,
]);

pub const FOLLOW_STATEMENT: TokenSet = STATEMENT_SEQUENCE_END.with(Token::Semicolon);

/// Symbols that close a field list sequence.
pub const FIELD_LIST_SEQUENCE_END: TokenSet = TokenSet::from_list(&[
    Token::End,
    Token::Else,
    Token::Bar,
    Token::EndOfFile,
]);

pub const FOLLOW_FIELD_LIST: TokenSet = FIELD_LIST_SEQUENCE_END.with(Token::Semicolon);

pub const FOLLOW_TYPE: TokenSet = TokenSet::union_of(&[
    FOLLOW_FIELD_LIST,
    TokenSet::from_list(&[Token::RParen]),
]);

pub const FOLLOW_EXPRESSION: TokenSet = TokenSet::union_of(&[
    FOLLOW_STATEMENT,
    TokenSet::from_list(&[
        Token::Then,
        Token::Do,
        Token::Of,
        Token::To,
        Token::By,
        Token::Comma,
        Token::Colon,
        Token::DotDot,
        Token::RParen,
        Token::RBracket,
        Token::RBrace,
    ]),
]);

pub const FOLLOW_DECLARATION: TokenSet = TokenSet::union_of(&[
    FIRST_DECLARATION,
    TokenSet::from_list(&[Token::Begin, Token::End, Token::EndOfFile]),
]);

pub const FOLLOW_IMPORT: TokenSet = TokenSet::union_of(&[FIRST_IMPORT, FOLLOW_DECLARATION]);

pub const FOLLOW_FORMAL_PARAMS: TokenSet =
    TokenSet::from_list(&[Token::Semicolon, Token::RParen, Token::EndOfFile]);

pub const FOLLOW_PROCEDURE_HEADER: TokenSet = TokenSet::union_of(&[
    FOLLOW_DECLARATION,
    TokenSet::from_list(&[Token::Semicolon]),
]);

/// After a block: the closing identifier and its terminator.
pub const FOLLOW_BLOCK: TokenSet = TokenSet::union_of(&[
    IDENT,
    TokenSet::from_list(&[Token::Dot, Token::Semicolon, Token::EndOfFile]),
]);

// === Resync Sets ===

/// Where a failed `THEN` resumes: the next branch or the end of the `IF`.
pub const THEN_RESYNC: TokenSet =
    TokenSet::from_list(&[Token::Elsif, Token::Else, Token::End, Token::EndOfFile]);

/// After the module identifier: the rest of the header and what follows it.
pub const MODULE_NAME_RESYNC: TokenSet = FOLLOW_IMPORT.with(Token::Semicolon);

/// After `MODULE`: the module identifier or anything after it.
pub const MODULE_KEYWORD_RESYNC: TokenSet = TokenSet::union_of(&[IDENT, MODULE_NAME_RESYNC]);

/// After the module header: imports, then declarations or the body.
pub const MODULE_HEADER_RESYNC: TokenSet = FOLLOW_IMPORT;

/// After a declaration item's `;`: another item or a new section.
pub const DECLARATION_ITEM_RESYNC: TokenSet = TokenSet::union_of(&[IDENT, FOLLOW_DECLARATION]);

pub const IMPORT_ITEM_RESYNC: TokenSet = TokenSet::union_of(&[
    FOLLOW_IMPORT,
    TokenSet::from_list(&[Token::Comma, Token::Semicolon]),
]);

pub const TYPE_RESYNC: TokenSet = TokenSet::union_of(&[FIRST_TYPE, FOLLOW_TYPE]);

pub const EXPRESSION_RESYNC: TokenSet = TokenSet::union_of(&[FIRST_EXPRESSION, FOLLOW_EXPRESSION]);

pub const STATEMENT_RESYNC: TokenSet = TokenSet::union_of(&[FIRST_STATEMENT, FOLLOW_STATEMENT]);

pub const END_OF_UNIT: TokenSet = EOF;

#[cfg(test)]
mod tests;
