//! Type denoters, field lists and formal types.

use m2c_diagnostic::{ErrorCode, Expected};
use m2c_ir::{AstKind, AstNode, Token, TokenSet};

use crate::parser::{Parsed, Parser};
use crate::recovery::{
    FIELD_LIST_SEQUENCE_END, FIRST_EXPRESSION, FIRST_FIELD_LIST, FIRST_FORMAL_TYPE, FIRST_TYPE,
    FOLLOW_FIELD_LIST, FOLLOW_TYPE, IDENT, TYPE_RESYNC,
};
use crate::RecordGrammar;

impl Parser<'_> {
    /// `type := ALIAS OF qualident | qualident | subrangeType | enumType
    ///        | setType | arrayType | recordType | pointerType | procedureType`
    pub(crate) fn type_(&mut self) -> Parsed {
        self.nested(Self::type_denoter)
    }

    fn type_denoter(&mut self) -> Parsed {
        let node = match self.la() {
            Token::Alias => {
                self.advance();
                self.match_token(Token::Of, IDENT.union(FOLLOW_TYPE));
                let (_, base) = self.qualident(FOLLOW_TYPE);
                AstNode::new(AstKind::Alias, vec![base])
            }
            Token::LBracket => self.subrange_type()?.1,
            Token::LParen => self.enum_type().1,
            Token::Set => {
                self.advance();
                self.match_token(Token::Of, IDENT.union(FOLLOW_TYPE).with(Token::LParen));
                let base = if self.at(Token::LParen) {
                    self.enum_type().1
                } else {
                    self.qualident(FOLLOW_TYPE).1
                };
                AstNode::new(AstKind::SetType, vec![base])
            }
            Token::Array => {
                self.advance();
                let (_, dimensions) = self.expression_list()?;
                self.match_token(Token::Of, TYPE_RESYNC);
                let (_, element) = self.type_()?;
                AstNode::new(AstKind::ArrayType, vec![dimensions, element])
            }
            Token::Record => self.record_type()?.1,
            Token::Pointer => {
                self.advance();
                self.match_token(Token::To, TYPE_RESYNC);
                let (_, target) = self.type_()?;
                AstNode::new(AstKind::Pointer, vec![target])
            }
            Token::Procedure => self.procedure_type().1,
            token if IDENT.contains(token) => self.qualident(FOLLOW_TYPE).1,
            _ => {
                self.match_set(FIRST_TYPE, FOLLOW_TYPE);
                AstNode::empty()
            }
        };
        Ok((self.la(), node))
    }

    /// `subrangeType := "[" expression ".." expression "]" [ OF qualident ]`
    fn subrange_type(&mut self) -> Parsed {
        self.advance();
        let (_, low) = self.expression()?;
        self.match_token(Token::DotDot, FIRST_EXPRESSION.with(Token::RBracket));
        let (_, high) = self.expression()?;
        self.match_token(Token::RBracket, FOLLOW_TYPE.with(Token::Of));
        let base = if self.at(Token::Of) {
            self.advance();
            self.qualident(FOLLOW_TYPE).1
        } else {
            AstNode::empty()
        };
        Ok((
            self.la(),
            AstNode::new(AstKind::Subrange, vec![low, high, base]),
        ))
    }

    /// `enumType := "(" [ "+" qualident "," ] identList ")"`
    fn enum_type(&mut self) -> (Token, AstNode) {
        self.advance();
        let base = if self.at(Token::Plus) {
            self.advance();
            let (_, base) = self.qualident(FOLLOW_TYPE.with(Token::Comma));
            self.match_token(Token::Comma, IDENT.union(FOLLOW_TYPE));
            base
        } else {
            AstNode::empty()
        };
        let (_, values) = self.ident_list(FOLLOW_TYPE);
        self.match_token(Token::RParen, FOLLOW_TYPE);
        (self.la(), AstNode::new(AstKind::Enum, vec![base, values]))
    }

    /// `recordType := RECORD fieldListSequence END` with variant records, or
    /// `RECORD [ "(" qualident ")" ] fieldListSequence END` with extensible ones.
    fn record_type(&mut self) -> Parsed {
        self.advance();
        let node = match self.options.record_grammar {
            RecordGrammar::Variant => {
                let (_, fields) = self.field_list_sequence()?;
                AstNode::new(AstKind::Record, vec![fields])
            }
            RecordGrammar::Extensible => {
                let base = if self.at(Token::LParen) {
                    self.advance();
                    let (_, base) = self.qualident(FOLLOW_FIELD_LIST.union(IDENT).with(Token::RParen));
                    self.match_token(Token::RParen, FIRST_FIELD_LIST.union(FOLLOW_FIELD_LIST));
                    base
                } else {
                    AstNode::empty()
                };
                let (_, fields) = self.field_list_sequence()?;
                AstNode::new(AstKind::ExtRecord, vec![base, fields])
            }
        };
        self.match_token(Token::End, FOLLOW_TYPE);
        Ok((self.la(), node))
    }

    // === Field Lists ===

    /// `fieldListSequence := fieldList { ";" fieldList }`
    fn field_list_sequence(&mut self) -> Parsed {
        if self.at_any(&FIELD_LIST_SEQUENCE_END) {
            return Ok((self.la(), self.empty_sequence(ErrorCode::E0205)));
        }
        let mut sequence = AstNode::bare(AstKind::FieldListSeq);
        loop {
            let (_, fields) = self.field_list()?;
            if !fields.is_empty() {
                sequence.push(fields);
            }
            if self.at(Token::Semicolon) {
                let semicolon = self.advance();
                if self.at_any(&FIELD_LIST_SEQUENCE_END) {
                    self.errant_semicolon(semicolon);
                    break;
                }
                continue;
            }
            if self.at_any(&self.first_field_list()) {
                self.unexpected(Expected::Token(Token::Semicolon));
                continue;
            }
            break;
        }
        if sequence.children().is_empty() {
            return Ok((self.la(), AstNode::empty()));
        }
        Ok((self.la(), sequence))
    }

    /// Field lists start with `CASE` only under the variant record grammar.
    fn first_field_list(&self) -> TokenSet {
        match self.options.record_grammar {
            RecordGrammar::Variant => FIRST_FIELD_LIST,
            RecordGrammar::Extensible => IDENT,
        }
    }

    /// `fieldList := identList ":" type | CASE [ ident ] ":" qualident OF
    ///   variant { "|" variant } [ ELSE fieldListSequence ] END`
    fn field_list(&mut self) -> Parsed {
        let first = self.first_field_list();
        if self.at_any(&IDENT) {
            let (_, names) = self.ident_list(FOLLOW_FIELD_LIST.union(FIRST_TYPE).with(Token::Colon));
            self.match_token(Token::Colon, TYPE_RESYNC);
            let (_, ty) = self.type_()?;
            return Ok((self.la(), AstNode::new(AstKind::FieldList, vec![names, ty])));
        }
        if self.at(Token::Case) && first.contains(Token::Case) {
            return self.nested(Self::variant_field_list);
        }
        self.match_set(first, FOLLOW_FIELD_LIST);
        Ok((self.la(), AstNode::empty()))
    }

    fn variant_field_list(&mut self) -> Parsed {
        self.advance();
        let tag = if self.at_any(&IDENT) {
            self.leaf(AstKind::Ident)
        } else {
            AstNode::empty()
        };
        self.match_token(Token::Colon, IDENT.union(FOLLOW_FIELD_LIST).with(Token::Of));
        let (_, tag_type) = self.qualident(FOLLOW_FIELD_LIST.with(Token::Of));
        self.match_token(Token::Of, FIRST_EXPRESSION.union(FOLLOW_FIELD_LIST));

        let mut variants = AstNode::bare(AstKind::VariantList);
        if self.at(Token::Bar) {
            self.advance();
        }
        loop {
            let (_, variant) = self.variant()?;
            variants.push(variant);
            if !self.at(Token::Bar) {
                break;
            }
            self.advance();
        }

        let otherwise = if self.at(Token::Else) {
            self.advance();
            self.field_list_sequence()?.1
        } else {
            AstNode::empty()
        };
        self.match_token(Token::End, FOLLOW_FIELD_LIST);
        Ok((
            self.la(),
            AstNode::new(
                AstKind::VariantFieldList,
                vec![tag, tag_type, variants, otherwise],
            ),
        ))
    }

    /// `variant := caseLabelList ":" fieldListSequence`
    fn variant(&mut self) -> Parsed {
        let (_, labels) = self.case_label_list()?;
        self.match_token(Token::Colon, FIRST_FIELD_LIST.union(FOLLOW_FIELD_LIST));
        let (_, fields) = self.field_list_sequence()?;
        Ok((
            self.la(),
            AstNode::new(AstKind::Variant, vec![labels, fields]),
        ))
    }

    // === Procedure Types ===

    /// `procedureType := PROCEDURE [ "(" formalType { "," formalType } ")" ] [ ":" qualident ]`
    fn procedure_type(&mut self) -> (Token, AstNode) {
        self.advance();
        let params = if self.at(Token::LParen) {
            self.advance();
            self.formal_type_list()
        } else {
            AstNode::empty()
        };
        let result = if self.at(Token::Colon) {
            self.advance();
            self.qualident(FOLLOW_TYPE).1
        } else {
            AstNode::empty()
        };
        (
            self.la(),
            AstNode::new(AstKind::ProcType, vec![params, result]),
        )
    }

    /// Formal types up to and including `)`; `EMPTY` for `()`.
    fn formal_type_list(&mut self) -> AstNode {
        if self.at(Token::RParen) {
            self.advance();
            return AstNode::empty();
        }
        let item_resync = FOLLOW_TYPE.union(TokenSet::from_list(&[Token::Comma, Token::Colon]));
        let mut list = AstNode::bare(AstKind::FormalTypeList);
        loop {
            let (_, ty) = self.formal_type(item_resync);
            list.push(ty);
            if !self.at(Token::Comma) {
                break;
            }
            self.advance();
        }
        self.match_token(Token::RParen, FOLLOW_TYPE.with(Token::Colon));
        list
    }

    /// `formalType := [ ARGLIST OF | CAST ] [ ARRAY OF ] qualident`
    pub(crate) fn formal_type(&mut self, resync: TokenSet) -> (Token, AstNode) {
        let node = match self.la() {
            Token::Arglist => {
                self.advance();
                self.match_token(Token::Of, FIRST_FORMAL_TYPE.union(resync));
                let inner = self.open_array_or_qualident(resync);
                AstNode::new(AstKind::ArgList, vec![inner])
            }
            Token::Cast => {
                self.advance();
                let inner = self.open_array_or_qualident(resync);
                AstNode::new(AstKind::CastParam, vec![inner])
            }
            _ => self.open_array_or_qualident(resync),
        };
        (self.la(), node)
    }

    /// `[ ARRAY OF ] qualident`
    fn open_array_or_qualident(&mut self, resync: TokenSet) -> AstNode {
        if self.at(Token::Array) {
            self.advance();
            self.match_token(Token::Of, IDENT.union(resync));
            let (_, element) = self.qualident(resync);
            return AstNode::new(AstKind::OpenArray, vec![element]);
        }
        self.qualident(resync).1
    }
}
