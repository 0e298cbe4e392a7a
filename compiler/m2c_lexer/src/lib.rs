//! Lexer for the m2c front end.
//!
//! [`Scanner`](scanner) recognizes raw symbols from a [`Cursor`]; the
//! [`Lexer`] wraps it in the two-symbol window the parser reads from and
//! interns every lexeme.
//!
//! [`Cursor`]: m2c_lexer_core::Cursor

mod lexer;
mod options;
mod scanner;

pub use lexer::{tokenize, Lexer, Symbol, Tokenized};
pub use options::LexerOptions;
pub use scanner::MAX_COMMENT_NESTING;
