//! Constant, type, variable and procedure declarations.

use m2c_diagnostic::ErrorCode;
use m2c_ir::{AstKind, AstNode, Token, TokenSet};

use crate::parser::{Parsed, Parser};
use crate::recovery::{
    DECLARATION_ITEM_RESYNC, EXPRESSION_RESYNC, FIRST_DECLARATION, FIRST_FORMAL_TYPE,
    FOLLOW_DECLARATION, FOLLOW_FORMAL_PARAMS, FOLLOW_PROCEDURE_HEADER, IDENT, TYPE_RESYNC,
};

/// `PROCEDURE ident [ "(" formalParams { ";" formalParams } ")" ] [ ":" qualident ]`
struct ProcedureHeader {
    name: AstNode,
    params: AstNode,
    result: AstNode,
}

impl Parser<'_> {
    /// `{ definition }` as `DEFLIST` or `{ declaration }` as `DECLLIST`,
    /// `EMPTY` when there are none.
    pub(crate) fn declaration_list(&mut self, kind: AstKind) -> Parsed {
        let definitions = kind == AstKind::DefList;
        let closers = if definitions {
            TokenSet::from_list(&[Token::End, Token::EndOfFile])
        } else {
            TokenSet::from_list(&[Token::Begin, Token::End, Token::EndOfFile])
        };

        let mut list = AstNode::bare(kind);
        loop {
            match self.la() {
                Token::Const => {
                    self.advance();
                    while self.at_any(&IDENT) {
                        let (_, def) = self.const_def()?;
                        list.push(def);
                        self.match_token(Token::Semicolon, DECLARATION_ITEM_RESYNC);
                    }
                }
                Token::Type => {
                    self.advance();
                    while self.at_any(&IDENT) {
                        let (_, def) = self.type_def()?;
                        list.push(def);
                        self.match_token(Token::Semicolon, DECLARATION_ITEM_RESYNC);
                    }
                }
                Token::Var => {
                    self.advance();
                    while self.at_any(&IDENT) {
                        let (_, decl) = self.var_decl()?;
                        list.push(decl);
                        self.match_token(Token::Semicolon, DECLARATION_ITEM_RESYNC);
                    }
                }
                Token::Procedure => {
                    let (_, procedure) = if definitions {
                        self.procedure_definition()
                    } else {
                        self.procedure_declaration()?
                    };
                    list.push(procedure);
                }
                token if closers.contains(token) => break,
                _ => {
                    let resync = FIRST_DECLARATION.union(closers);
                    self.match_set(resync, resync);
                }
            }
        }

        if list.children().is_empty() {
            return Ok((self.la(), AstNode::empty()));
        }
        Ok((self.la(), list))
    }

    /// `constDef := ident "=" expression`
    fn const_def(&mut self) -> Parsed {
        let (_, name) = self.ident(DECLARATION_ITEM_RESYNC);
        self.match_token(Token::Equal, EXPRESSION_RESYNC);
        let (_, value) = self.expression()?;
        self.stats_mut().declarations += 1;
        Ok((
            self.la(),
            AstNode::new(AstKind::ConstDef, vec![name, value]),
        ))
    }

    /// `typeDef := ident "=" ( type | OPAQUE )`
    fn type_def(&mut self) -> Parsed {
        let (_, name) = self.ident(DECLARATION_ITEM_RESYNC);
        self.match_token(Token::Equal, TYPE_RESYNC.with(Token::Opaque));
        let denoter = if self.at(Token::Opaque) {
            if !self.in_definition {
                let diagnostic = self.diagnostic_here(ErrorCode::E0206);
                self.report(diagnostic);
            }
            self.advance();
            AstNode::bare(AstKind::Opaque)
        } else {
            self.type_()?.1
        };
        self.stats_mut().declarations += 1;
        Ok((
            self.la(),
            AstNode::new(AstKind::TypeDef, vec![name, denoter]),
        ))
    }

    /// `varDecl := identList ":" type`
    fn var_decl(&mut self) -> Parsed {
        let (_, names) = self.ident_list(DECLARATION_ITEM_RESYNC.union(TYPE_RESYNC).with(Token::Colon));
        self.match_token(Token::Colon, TYPE_RESYNC);
        let (_, ty) = self.type_()?;
        self.stats_mut().declarations += 1;
        Ok((self.la(), AstNode::new(AstKind::VarDecl, vec![names, ty])))
    }

    // === Procedures ===

    /// `procedureHeader ";"` in a definition module.
    fn procedure_definition(&mut self) -> (Token, AstNode) {
        let header = self.procedure_header();
        self.match_token(Token::Semicolon, FOLLOW_DECLARATION);
        self.count_procedure();
        let node = AstNode::new(
            AstKind::ProcDef,
            vec![header.name, header.params, header.result],
        );
        (self.la(), node)
    }

    /// `procedureHeader ";" block ident ";"`
    fn procedure_declaration(&mut self) -> Parsed {
        self.nested(|p| {
            let header = p.procedure_header();
            p.match_token(Token::Semicolon, FOLLOW_DECLARATION);
            let (_, block) = p.block()?;
            p.closing_ident(header.name.value(), FOLLOW_PROCEDURE_HEADER);
            p.match_token(Token::Semicolon, FOLLOW_DECLARATION);
            p.count_procedure();
            let node = AstNode::new(
                AstKind::ProcDecl,
                vec![header.name, header.params, header.result, block],
            );
            Ok((p.la(), node))
        })
    }

    fn procedure_header(&mut self) -> ProcedureHeader {
        self.advance();
        let header_rest = FOLLOW_PROCEDURE_HEADER.union(TokenSet::from_list(&[Token::LParen, Token::Colon]));
        let (_, name) = self.ident(header_rest);
        tracing::trace!(line = self.la_symbol().line, "procedure header");
        let (_, params) = self.formal_parameter_list();
        let result = if self.at(Token::Colon) {
            self.advance();
            self.qualident(FOLLOW_PROCEDURE_HEADER).1
        } else {
            AstNode::empty()
        };
        ProcedureHeader {
            name,
            params,
            result,
        }
    }

    fn count_procedure(&mut self) {
        let stats = self.stats_mut();
        stats.procedures += 1;
        stats.declarations += 1;
    }

    /// `"(" formalParams { ";" formalParams } ")"`, `EMPTY` when absent
    /// or written as `()`.
    fn formal_parameter_list(&mut self) -> (Token, AstNode) {
        if !self.at(Token::LParen) {
            return (self.la(), AstNode::empty());
        }
        self.advance();
        if self.at(Token::RParen) {
            self.advance();
            return (self.la(), AstNode::empty());
        }

        let mut list = AstNode::bare(AstKind::FParamList);
        loop {
            let (_, params) = self.formal_params();
            list.push(params);
            if !self.at(Token::Semicolon) {
                break;
            }
            let semicolon = self.advance();
            if self.at(Token::RParen) {
                self.errant_semicolon(semicolon);
                break;
            }
        }
        self.match_token(Token::RParen, FOLLOW_PROCEDURE_HEADER.with(Token::Colon));
        (self.la(), list)
    }

    /// `formalParams := [ CONST | VAR ] identList ":" formalType`
    fn formal_params(&mut self) -> (Token, AstNode) {
        let kind = match self.la() {
            Token::Const => {
                self.advance();
                AstKind::ConstParams
            }
            Token::Var => {
                self.advance();
                AstKind::VarParams
            }
            _ => AstKind::FParams,
        };
        let (_, names) = self.ident_list(FOLLOW_FORMAL_PARAMS.with(Token::Colon));
        self.match_token(Token::Colon, FIRST_FORMAL_TYPE.union(FOLLOW_FORMAL_PARAMS));
        let (_, ty) = self.formal_type(FOLLOW_FORMAL_PARAMS);
        (self.la(), AstNode::new(kind, vec![names, ty]))
    }
}
