//! Compilation units, imports and blocks.

use m2c_diagnostic::{ErrorCode, Expected};
use m2c_ir::{AstKind, AstNode, Token, TokenSet};

use crate::parser::{NestingTooDeep, Parsed, Parser};
use crate::recovery::{
    END_OF_UNIT, FIRST_COMPILATION_UNIT, FIRST_IMPORT, FIRST_PROGRAM_UNIT, FOLLOW_BLOCK,
    FOLLOW_IMPORT, IDENT, IMPORT_ITEM_RESYNC, MODULE_HEADER_RESYNC, MODULE_KEYWORD_RESYNC,
    MODULE_NAME_RESYNC,
};
use crate::{FailureKind, SourceKind};

impl Parser<'_> {
    /// `compilationUnit := definitionModule | implOrPrgModule`
    ///
    /// Only the start symbol the caller asked for is accepted; anything
    /// else fails the unit.
    pub(crate) fn compilation_unit(&mut self, kind: SourceKind) -> Result<AstNode, FailureKind> {
        let accepted = match kind {
            SourceKind::Any => FIRST_COMPILATION_UNIT,
            SourceKind::Definition => TokenSet::from_list(&[Token::Definition]),
            SourceKind::ImplementationOrProgram => FIRST_PROGRAM_UNIT,
        };
        if !self.at_any(&accepted) {
            let diagnostic = self
                .found_here(ErrorCode::E0208)
                .with_expected(Expected::Set(accepted));
            self.report(diagnostic);
            return Err(FailureKind::InvalidStartSymbol);
        }

        tracing::debug!(start = %self.la(), "compilation unit");
        let parsed = if self.at(Token::Definition) {
            self.definition_module()
        } else {
            self.program_module()
        };
        match parsed {
            Ok((_, ast)) => Ok(ast),
            Err(NestingTooDeep) => Err(FailureKind::NestingTooDeep {
                limit: self.options.max_nesting,
            }),
        }
    }

    /// `definitionModule := DEFINITION MODULE ident ";" { import } { definition } END ident "."`
    fn definition_module(&mut self) -> Parsed {
        self.in_definition = true;
        self.advance();
        self.match_token(Token::Module, MODULE_KEYWORD_RESYNC);
        let (_, name) = self.ident(MODULE_NAME_RESYNC);
        self.match_token(Token::Semicolon, MODULE_HEADER_RESYNC);

        let (_, imports) = self.import_list();
        let (_, definitions) = self.declaration_list(AstKind::DefList)?;

        self.module_end(&name);
        Ok((
            self.la(),
            AstNode::new(AstKind::DefMod, vec![name, imports, definitions]),
        ))
    }

    /// `implOrPrgModule := [ IMPLEMENTATION ] MODULE ident ";" { import } block ident "."`
    fn program_module(&mut self) -> Parsed {
        let kind = if self.at(Token::Implementation) {
            self.advance();
            AstKind::ImpMod
        } else {
            AstKind::PgmMod
        };
        self.match_token(Token::Module, MODULE_KEYWORD_RESYNC);
        let (_, name) = self.ident(MODULE_NAME_RESYNC);
        self.match_token(Token::Semicolon, MODULE_HEADER_RESYNC);

        let (_, imports) = self.import_list();
        let (_, block) = self.block()?;

        self.module_closing(&name);
        Ok((self.la(), AstNode::new(kind, vec![name, imports, block])))
    }

    /// `END ident "."` closing a definition module.
    fn module_end(&mut self, name: &AstNode) {
        self.match_token(Token::End, FOLLOW_BLOCK);
        self.module_closing(name);
    }

    /// `ident "."` and nothing after it.
    fn module_closing(&mut self, name: &AstNode) {
        let dot = TokenSet::from_list(&[Token::Dot]);
        self.closing_ident(name.value(), dot);
        self.match_token(Token::Dot, END_OF_UNIT);
        if !self.at(Token::EndOfFile) {
            self.unexpected(Expected::Token(Token::EndOfFile));
            self.skip_to(END_OF_UNIT);
        }
    }

    // === Imports ===

    /// `{ import }` as `IMPLIST`, or `EMPTY` when there are none.
    fn import_list(&mut self) -> (Token, AstNode) {
        if !self.at_any(&FIRST_IMPORT) {
            return (self.la(), AstNode::empty());
        }
        let mut list = AstNode::bare(AstKind::ImpList);
        while self.at_any(&FIRST_IMPORT) {
            let (_, import) = self.import();
            list.push(import);
        }
        (self.la(), list)
    }

    /// `import := IMPORT ident { "," ident } ";" | FROM ident IMPORT identList ";"`
    fn import(&mut self) -> (Token, AstNode) {
        let node = if self.at(Token::From) {
            self.advance();
            let (_, module) = self.ident(IMPORT_ITEM_RESYNC.with(Token::Import));
            self.match_token(Token::Import, IDENT.union(IMPORT_ITEM_RESYNC));
            let (_, names) = self.ident_list(IMPORT_ITEM_RESYNC);
            AstNode::new(AstKind::UnqImp, vec![module, names])
        } else {
            self.advance();
            let mut import = AstNode::bare(AstKind::Import);
            loop {
                let (_, module) = self.ident(IMPORT_ITEM_RESYNC);
                if !module.is_empty() {
                    import.push(module);
                }
                if !self.at(Token::Comma) {
                    break;
                }
                self.advance();
            }
            import
        };
        self.match_token(Token::Semicolon, FOLLOW_IMPORT);
        (self.la(), node)
    }

    // === Blocks ===

    /// `block := { declaration } [ BEGIN statementSequence ] END`
    pub(crate) fn block(&mut self) -> Parsed {
        let (_, declarations) = self.declaration_list(AstKind::DeclList)?;
        let body = if self.at(Token::Begin) {
            self.advance();
            self.statement_sequence()?.1
        } else {
            AstNode::empty()
        };
        self.match_token(Token::End, FOLLOW_BLOCK);
        Ok((
            self.la(),
            AstNode::new(AstKind::Block, vec![declarations, body]),
        ))
    }

    /// Report an empty required sequence, leaving an `EMPTY` in its place.
    pub(crate) fn empty_sequence(&mut self, code: ErrorCode) -> AstNode {
        let diagnostic = self.found_here(code);
        self.report(diagnostic);
        AstNode::empty()
    }
}
