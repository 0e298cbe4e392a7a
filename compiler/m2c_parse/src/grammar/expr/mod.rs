//! Expressions, designators and structured values.
//!
//! Precedence climbs from relations (`=`, `IN`, ...) through additive and
//! multiplicative operators to `NOT`, type conversion and the factors.
//! Binary operators are left associative; a relation takes at most one
//! operator.

use m2c_diagnostic::Expected;
use m2c_ir::{AstKind, AstNode, Token};

use crate::parser::{NestingTooDeep, Parsed, Parser};
use crate::recovery::{FIRST_EXPRESSION, FOLLOW_EXPRESSION, IDENT, OPER_L1, OPER_L2, OPER_L3};

/// Node kind of a binary operator token.
fn binary_kind(token: Token) -> Option<AstKind> {
    let kind = match token {
        Token::Equal => AstKind::Eq,
        Token::NotEqual => AstKind::Neq,
        Token::Less => AstKind::Lt,
        Token::LessOrEqual => AstKind::LtEq,
        Token::Greater => AstKind::Gt,
        Token::GreaterOrEqual => AstKind::GtEq,
        Token::Identity => AstKind::Identity,
        Token::In => AstKind::In,
        Token::Plus => AstKind::Plus,
        Token::Minus => AstKind::Minus,
        Token::Or => AstKind::Or,
        Token::Asterisk => AstKind::Mul,
        Token::Solidus => AstKind::Divide,
        Token::Div => AstKind::Div,
        Token::Mod => AstKind::Mod,
        Token::And => AstKind::And,
        _ => return None,
    };
    Some(kind)
}

/// Leaf kind of a literal token. Malformed literals were already reported
/// by the lexer and stand in for their well-formed counterparts.
fn literal_kind(token: Token) -> Option<AstKind> {
    let kind = match token {
        Token::WholeNumber | Token::MalformedNumber => AstKind::IntVal,
        Token::RealNumber => AstKind::RealVal,
        Token::CharCode => AstKind::ChrVal,
        Token::QuotedString | Token::MalformedString => AstKind::QuotedVal,
        _ => return None,
    };
    Some(kind)
}

impl Parser<'_> {
    /// `expression := simpleExpression [ operL1 simpleExpression ]`
    pub(crate) fn expression(&mut self) -> Parsed {
        self.nested(|p| {
            let (_, left) = p.simple_expression()?;
            if !p.at_any(&OPER_L1) {
                return Ok((p.la(), left));
            }
            let Some(kind) = binary_kind(p.advance().token) else {
                return Ok((p.la(), left));
            };
            let (_, right) = p.simple_expression()?;
            Ok((p.la(), AstNode::new(kind, vec![left, right])))
        })
    }

    /// `simpleExpression := [ "+" | "-" ] term { operL2 term }`
    ///
    /// A leading `-` negates the first term only.
    fn simple_expression(&mut self) -> Parsed {
        let negate = match self.la() {
            Token::Minus => {
                self.advance();
                true
            }
            Token::Plus => {
                self.advance();
                false
            }
            _ => false,
        };
        let (_, mut left) = self.term()?;
        if negate {
            left = AstNode::new(AstKind::Neg, vec![left]);
        }
        while self.at_any(&OPER_L2) {
            let Some(kind) = binary_kind(self.advance().token) else {
                break;
            };
            let (_, right) = self.term()?;
            left = AstNode::new(kind, vec![left, right]);
        }
        Ok((self.la(), left))
    }

    /// `term := simpleTerm { operL3 simpleTerm }`
    fn term(&mut self) -> Parsed {
        let (_, mut left) = self.simple_term()?;
        while self.at_any(&OPER_L3) {
            let Some(kind) = binary_kind(self.advance().token) else {
                break;
            };
            let (_, right) = self.simple_term()?;
            left = AstNode::new(kind, vec![left, right]);
        }
        Ok((self.la(), left))
    }

    /// `simpleTerm := [ NOT ] factor`
    fn simple_term(&mut self) -> Parsed {
        if self.at(Token::Not) {
            self.advance();
            let (_, operand) = self.factor()?;
            return Ok((self.la(), AstNode::new(AstKind::Not, vec![operand])));
        }
        self.factor()
    }

    /// `factor := simpleFactor [ "::" qualident ]`
    fn factor(&mut self) -> Parsed {
        let (_, value) = self.simple_factor()?;
        if !self.at(Token::TypeConv) {
            return Ok((self.la(), value));
        }
        self.advance();
        let (_, target) = self.qualident(FOLLOW_EXPRESSION);
        Ok((
            self.la(),
            AstNode::new(AstKind::TypeConv, vec![value, target]),
        ))
    }

    /// `simpleFactor := literal | structuredValue | designator [ actualParameters ]
    ///                | "(" expression ")"`
    fn simple_factor(&mut self) -> Parsed {
        let token = self.la();
        if let Some(kind) = literal_kind(token) {
            let node = self.leaf(kind);
            return Ok((self.la(), node));
        }
        match token {
            Token::LBrace => self.structured_value(),
            Token::LParen => {
                self.advance();
                let (_, inner) = self.expression()?;
                self.match_token(Token::RParen, FOLLOW_EXPRESSION);
                Ok((self.la(), inner))
            }
            token if IDENT.contains(token) => {
                let (_, designator) = self.designator()?;
                if !self.at(Token::LParen) {
                    return Ok((self.la(), designator));
                }
                let (_, args) = self.actual_parameters()?;
                Ok((
                    self.la(),
                    AstNode::new(AstKind::FCall, vec![designator, args]),
                ))
            }
            _ => {
                self.unexpected(Expected::Set(FIRST_EXPRESSION));
                self.skip_to(FOLLOW_EXPRESSION);
                Ok((self.la(), AstNode::empty()))
            }
        }
    }

    // === Designators ===

    /// `designator := ident { "." ident | "[" expressionList "]" | "^" }`
    pub(crate) fn designator(&mut self) -> Parsed {
        let (_, mut designator) = self.ident(FOLLOW_EXPRESSION);
        loop {
            designator = match self.la() {
                Token::Dot => {
                    self.advance();
                    let (_, field) = self.ident(FOLLOW_EXPRESSION);
                    AstNode::new(AstKind::Field, vec![designator, field])
                }
                Token::LBracket => {
                    self.advance();
                    let (_, subscripts) = self.expression_list()?;
                    self.match_token(Token::RBracket, FOLLOW_EXPRESSION);
                    AstNode::new(AstKind::Index, vec![designator, subscripts])
                }
                Token::Deref => {
                    self.advance();
                    AstNode::new(AstKind::Deref, vec![designator])
                }
                _ => break,
            };
        }
        Ok((self.la(), designator))
    }

    /// `actualParameters := "(" [ expressionList ] ")"` as `ARGS`.
    pub(crate) fn actual_parameters(&mut self) -> Parsed {
        self.advance();
        let args = if self.at(Token::RParen) {
            Vec::new()
        } else {
            self.expressions()?
        };
        self.match_token(Token::RParen, FOLLOW_EXPRESSION);
        Ok((self.la(), AstNode::new(AstKind::Args, args)))
    }

    // === Lists ===

    /// `expression { "," expression }`
    fn expressions(&mut self) -> Result<Vec<AstNode>, NestingTooDeep> {
        let mut items = Vec::new();
        loop {
            let (_, item) = self.expression()?;
            items.push(item);
            if !self.at(Token::Comma) {
                break;
            }
            self.advance();
        }
        Ok(items)
    }

    /// `expressionList := expression { "," expression }` as `EXPRLIST`.
    pub(crate) fn expression_list(&mut self) -> Parsed {
        let items = self.expressions()?;
        Ok((self.la(), AstNode::new(AstKind::ExprList, items)))
    }

    /// `expression [ ".." expression ]`, a `RANGE` when the bound is given.
    fn range_or_expression(&mut self) -> Parsed {
        let (_, low) = self.expression()?;
        if !self.at(Token::DotDot) {
            return Ok((self.la(), low));
        }
        self.advance();
        let (_, high) = self.expression()?;
        Ok((self.la(), AstNode::new(AstKind::Range, vec![low, high])))
    }

    /// `caseLabelList := caseLabels { "," caseLabels }` as `CLABELLIST`.
    pub(crate) fn case_label_list(&mut self) -> Parsed {
        let mut labels = AstNode::bare(AstKind::CaseLabelList);
        loop {
            let (_, label) = self.range_or_expression()?;
            labels.push(label);
            if !self.at(Token::Comma) {
                break;
            }
            self.advance();
        }
        Ok((self.la(), labels))
    }

    /// `structuredValue := "{" [ valueComponent { "," valueComponent } ] "}"`
    fn structured_value(&mut self) -> Parsed {
        self.advance();
        let mut value = AstNode::bare(AstKind::StructVal);
        if !self.at(Token::RBrace) {
            loop {
                let (_, component) = self.range_or_expression()?;
                value.push(component);
                if !self.at(Token::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.match_token(Token::RBrace, FOLLOW_EXPRESSION);
        Ok((self.la(), value))
    }
}
