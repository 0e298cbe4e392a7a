//! m2c IR - shared vocabulary of the front end.
//!
//! - [`Token`]: the closed terminal vocabulary with O(1) classification
//! - [`TokenSet`]: const-built bitsets over tokens for FIRST/FOLLOW sets
//! - [`Name`] / [`StringInterner`]: per-parse lexeme storage
//! - [`AstNode`] / [`AstKind`]: the syntax tree handed to later passes

pub mod ast;
mod interner;
mod token;
mod token_set;

pub use ast::{AstKind, AstNode};
pub use interner::{Name, StringInterner};
pub use token::Token;
pub use token_set::{SegmentSet, TokenSet, TOKEN_SEGMENTS};
