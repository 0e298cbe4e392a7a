//! Statements and statement sequences.

use m2c_diagnostic::{ErrorCode, Expected};
use m2c_ir::{AstKind, AstNode, Token};

use crate::parser::{NestingTooDeep, Parsed, Parser};
use crate::recovery::{
    FIRST_EXPRESSION, FIRST_STATEMENT, FOLLOW_EXPRESSION, FOLLOW_STATEMENT, IDENT,
    STATEMENT_RESYNC, STATEMENT_SEQUENCE_END, THEN_RESYNC,
};

impl Parser<'_> {
    /// `statementSequence := statement { ";" statement }`
    ///
    /// An empty sequence is a warning and yields `EMPTY`. A missing `;`
    /// between two statements is reported and the next statement parsed.
    pub(crate) fn statement_sequence(&mut self) -> Parsed {
        if self.at_any(&STATEMENT_SEQUENCE_END) {
            return Ok((self.la(), self.empty_sequence(ErrorCode::E0204)));
        }
        let mut sequence = AstNode::bare(AstKind::StmtSeq);
        loop {
            let (_, statement) = self.statement()?;
            if !statement.is_empty() {
                sequence.push(statement);
            }
            if self.at(Token::Semicolon) {
                let semicolon = self.advance();
                if self.at_any(&STATEMENT_SEQUENCE_END) {
                    self.errant_semicolon(semicolon);
                    break;
                }
                continue;
            }
            if self.at_any(&FIRST_STATEMENT) {
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

    fn statement(&mut self) -> Parsed {
        self.nested(|p| {
            let node = match p.la() {
                Token::If => p.if_statement()?,
                Token::Case => p.case_statement()?,
                Token::Loop => {
                    p.advance();
                    let (_, body) = p.statement_sequence()?;
                    p.match_token(Token::End, FOLLOW_STATEMENT);
                    AstNode::new(AstKind::Loop, vec![body])
                }
                Token::While => {
                    p.advance();
                    let (_, condition) = p.expression()?;
                    p.match_token(Token::Do, STATEMENT_RESYNC);
                    let (_, body) = p.statement_sequence()?;
                    p.match_token(Token::End, FOLLOW_STATEMENT);
                    AstNode::new(AstKind::While, vec![condition, body])
                }
                Token::Repeat => {
                    p.advance();
                    let (_, body) = p.statement_sequence()?;
                    p.match_token(Token::Until, FIRST_EXPRESSION.union(FOLLOW_STATEMENT));
                    let (_, condition) = p.expression()?;
                    AstNode::new(AstKind::Repeat, vec![body, condition])
                }
                Token::For => p.for_statement()?,
                Token::Return => {
                    p.advance();
                    let value = if p.at_any(&FIRST_EXPRESSION) {
                        p.expression()?.1
                    } else {
                        AstNode::empty()
                    };
                    AstNode::new(AstKind::Return, vec![value])
                }
                Token::Exit => {
                    p.advance();
                    AstNode::bare(AstKind::Exit)
                }
                token if IDENT.contains(token) => p.assignment_or_call()?,
                _ => {
                    p.match_set(FIRST_STATEMENT, FOLLOW_STATEMENT);
                    return Ok((p.la(), AstNode::empty()));
                }
            };
            p.stats_mut().statements += 1;
            Ok((p.la(), node))
        })
    }

    /// `designator [ ":=" expression | actualParameters ]`
    fn assignment_or_call(&mut self) -> Result<AstNode, NestingTooDeep> {
        let (_, designator) = self.designator()?;
        let node = match self.la() {
            Token::Assign => {
                self.advance();
                let (_, value) = self.expression()?;
                AstNode::new(AstKind::Assign, vec![designator, value])
            }
            Token::LParen => {
                let (_, args) = self.actual_parameters()?;
                AstNode::new(AstKind::PCall, vec![designator, args])
            }
            _ => AstNode::new(AstKind::PCall, vec![designator, AstNode::empty()]),
        };
        Ok(node)
    }

    // === Conditionals ===

    /// `IF expression THEN statementSequence { ELSIF expression THEN statementSequence }
    ///  [ ELSE statementSequence ] END`
    fn if_statement(&mut self) -> Result<AstNode, NestingTooDeep> {
        self.advance();
        let (_, condition) = self.expression()?;
        let (_, then) = self.then_branch()?;

        let elsifs = if self.at(Token::Elsif) {
            let mut list = AstNode::bare(AstKind::ElsifList);
            while self.at(Token::Elsif) {
                self.advance();
                let (_, condition) = self.expression()?;
                let (_, body) = self.then_branch()?;
                list.push(AstNode::new(AstKind::Elsif, vec![condition, body]));
            }
            list
        } else {
            AstNode::empty()
        };

        let otherwise = self.else_branch()?;
        self.match_token(Token::End, FOLLOW_STATEMENT);
        Ok(AstNode::new(
            AstKind::If,
            vec![condition, then, elsifs, otherwise],
        ))
    }

    /// `THEN statementSequence`; without `THEN` the branch is skipped to the
    /// next `ELSIF`, `ELSE` or `END` and left `EMPTY`.
    fn then_branch(&mut self) -> Parsed {
        if !self.match_token(Token::Then, THEN_RESYNC) {
            return Ok((self.la(), AstNode::empty()));
        }
        self.statement_sequence()
    }

    fn else_branch(&mut self) -> Result<AstNode, NestingTooDeep> {
        if !self.at(Token::Else) {
            return Ok(AstNode::empty());
        }
        self.advance();
        Ok(self.statement_sequence()?.1)
    }

    /// `CASE expression OF { "|" case } [ ELSE statementSequence ] END`
    ///
    /// The `|` before the first case may be omitted.
    fn case_statement(&mut self) -> Result<AstNode, NestingTooDeep> {
        self.advance();
        let (_, selector) = self.expression()?;
        let branch_start = FIRST_EXPRESSION.union(STATEMENT_SEQUENCE_END);
        self.match_token(Token::Of, branch_start);

        let mut branches = AstNode::bare(AstKind::CaseList);
        loop {
            if self.at(Token::Bar) {
                self.advance();
            } else if !(branches.children().is_empty() && self.at_any(&FIRST_EXPRESSION)) {
                break;
            }
            let (_, labels) = self.case_label_list()?;
            self.match_token(Token::Colon, STATEMENT_RESYNC);
            let (_, body) = self.statement_sequence()?;
            branches.push(AstNode::new(AstKind::CaseBranch, vec![labels, body]));
        }
        let branches = if branches.children().is_empty() {
            AstNode::empty()
        } else {
            branches
        };

        let otherwise = self.else_branch()?;
        self.match_token(Token::End, FOLLOW_STATEMENT);
        Ok(AstNode::new(
            AstKind::Case,
            vec![selector, branches, otherwise],
        ))
    }

    // === Loops ===

    /// `FOR ident ":=" expression TO expression [ BY expression ] DO statementSequence END`
    fn for_statement(&mut self) -> Result<AstNode, NestingTooDeep> {
        self.advance();
        let (_, control) = self.ident(FOLLOW_EXPRESSION.with(Token::Assign));
        self.match_token(Token::Assign, FIRST_EXPRESSION.union(FOLLOW_EXPRESSION));
        let (_, start) = self.expression()?;
        self.match_token(Token::To, FIRST_EXPRESSION.union(FOLLOW_EXPRESSION));
        let (_, end) = self.expression()?;
        let step = if self.at(Token::By) {
            self.advance();
            self.expression()?.1
        } else {
            AstNode::empty()
        };
        self.match_token(Token::Do, STATEMENT_RESYNC);
        let (_, body) = self.statement_sequence()?;
        self.match_token(Token::End, FOLLOW_STATEMENT);
        Ok(AstNode::new(
            AstKind::For,
            vec![control, start, end, step, body],
        ))
    }
}
