//! Grammar productions, one method per production.
//!
//! Organized by area:
//! - `module`: compilation units, imports and blocks
//! - `decl`: constant, type, variable and procedure declarations
//! - `ty`: type denoters, field lists and formal types
//! - `stmt`: statements and statement sequences
//! - `expr`: expressions, designators and structured values

mod decl;
mod expr;
mod module;
mod stmt;
mod ty;

use m2c_ir::{AstKind, AstNode, Token, TokenSet};

use crate::parser::Parser;

impl Parser<'_> {
    /// `identList := ident { "," ident }`
    pub(crate) fn ident_list(&mut self, resync: TokenSet) -> (Token, AstNode) {
        let item_resync = resync.with(Token::Comma);
        let mut list = AstNode::bare(AstKind::IdentList);
        loop {
            let (_, ident) = self.ident(item_resync);
            if !ident.is_empty() {
                list.push(ident);
            }
            if !self.at(Token::Comma) {
                break;
            }
            self.advance();
        }
        (self.la(), list)
    }

    /// `qualident := ident { "." ident }`
    ///
    /// A single identifier stays a bare `IDENT`.
    pub(crate) fn qualident(&mut self, resync: TokenSet) -> (Token, AstNode) {
        let (_, first) = self.ident(resync);
        if first.is_empty() || !self.at(Token::Dot) {
            return (self.la(), first);
        }
        let mut parts = vec![first];
        while self.at(Token::Dot) {
            self.advance();
            let (_, part) = self.ident(resync);
            if part.is_empty() {
                break;
            }
            parts.push(part);
        }
        (self.la(), AstNode::new(AstKind::QualIdent, parts))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use m2c_diagnostic::Diagnostic;
    use m2c_lexer_core::SourceBuffer;

    use crate::parser::{Parsed, Parser};
    use crate::ParseOptions;

    /// Run one production over `source`, rendering its subtree.
    pub(crate) fn fragment_with(
        source: &str,
        options: ParseOptions,
        production: impl FnOnce(&mut Parser<'_>) -> Parsed,
    ) -> (String, Vec<Diagnostic>) {
        let buffer = SourceBuffer::new(source);
        let mut parser = Parser::new(&buffer, options);
        let node = match production(&mut parser) {
            Ok((_, node)) => node,
            Err(_) => m2c_ir::AstNode::empty(),
        };
        let (_, diagnostics, interner, _) = parser.finish();
        (node.to_sexpr(&interner), diagnostics)
    }

    pub(crate) fn fragment(
        source: &str,
        production: impl FnOnce(&mut Parser<'_>) -> Parsed,
    ) -> (String, Vec<Diagnostic>) {
        fragment_with(source, ParseOptions::default(), production)
    }
}
