//! Statement and block parsing.

use std::rc::Rc;

use bpl_ir::{Block, ExprKind, FunctionDef, Ident, Program, Stmt, StmtKind, TokenKind};
use bpl_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse a whole program.
    ///
    /// Grammar: `program = { NEWLINE | statement } EOF`
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let pos = self.cursor.current_pos();
        let mut statements = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.is_at_end() {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(Program { statements, pos })
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| match self.cursor.current_kind() {
            TokenKind::Function => {
                self.in_error_context(ErrorContext::FunctionDef, Self::parse_function_def)
            }
            TokenKind::If => self.in_error_context(ErrorContext::IfStatement, Self::parse_if),
            TokenKind::While => self.in_error_context(ErrorContext::WhileLoop, Self::parse_while),
            TokenKind::Return => {
                self.in_error_context(ErrorContext::ReturnStatement, Self::parse_return)
            }
            _ => self.parse_simple_statement(),
        })
    }

    /// `function_def = "ফাংশন" IDENT "(" [ IDENT { "," IDENT } ] ")" block`
    fn parse_function_def(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.advance().pos;
        let name = self.cursor.expect_ident()?;
        self.cursor.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.cursor.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        let def = FunctionDef {
            name,
            params,
            body,
            pos,
        };
        Ok(Stmt::new(StmtKind::FunctionDef(Rc::new(def)), pos))
    }

    fn parse_params(&mut self) -> Result<Vec<Ident>, ParseError> {
        let mut params = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            let span = self.cursor.current_span();
            let param = self.cursor.expect_ident()?;
            if params.iter().any(|p: &Ident| p.name == param.name) {
                let name = self.cursor.interner().lookup(param.name).to_owned();
                return Err(ParseError::new(
                    ParseErrorKind::DuplicateParameter { name },
                    span,
                    param.pos,
                ));
            }
            params.push(param);
            if !self.cursor.check(TokenKind::Comma) {
                break;
            }
            self.cursor.advance();
        }
        Ok(params)
    }

    /// `if_stmt = "যদি" expr block [ "নইলে" ( if_stmt | block ) ]`
    ///
    /// `নইলে যদি` nests the trailing `if` as the sole statement of the else
    /// block.
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.advance().pos;
        let condition = self.parse_expr()?;
        let then_block = self.parse_block()?;
        let else_block = if self.cursor.check(TokenKind::Else) {
            let else_pos = self.cursor.advance().pos;
            if self.cursor.check(TokenKind::If) {
                let nested = self.parse_if()?;
                Some(Block {
                    statements: vec![nested],
                    pos: else_pos,
                })
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };
        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_block,
                else_block,
            },
            pos,
        ))
    }

    /// `while_stmt = "যখন" expr block`
    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.advance().pos;
        let condition = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::new(StmtKind::While { condition, body }, pos))
    }

    /// `return_stmt = "ফেরত" [ expr ] NEWLINE`
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.advance().pos;
        let value = if self.at_statement_end() {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect_statement_end()?;
        Ok(Stmt::new(StmtKind::Return(value), pos))
    }

    /// `simple_stmt = IDENT "=" expr NEWLINE | expr NEWLINE`
    fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expr()?;
        let pos = expr.pos;
        if !self.cursor.check(TokenKind::Eq) {
            self.expect_statement_end()?;
            return Ok(Stmt::new(StmtKind::Expr(expr), pos));
        }

        let ExprKind::Ident(name) = expr.kind else {
            let eq = self.cursor.current();
            return Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                eq.span,
                pos,
            ));
        };
        self.cursor.advance();
        self.in_error_context(ErrorContext::Assignment, |p| {
            let value = p.parse_expr()?;
            p.expect_statement_end()?;
            Ok(Stmt::new(
                StmtKind::Assign {
                    target: Ident { name, pos },
                    value,
                },
                pos,
            ))
        })
    }

    /// `block = ":" NEWLINE INDENT statement { statement } DEDENT`
    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.cursor.expect(TokenKind::Colon)?;
        // The body must start on its own line.
        let has_newline = self.cursor.check(TokenKind::Newline);
        if has_newline {
            self.cursor.advance();
        }
        if !has_newline || !self.cursor.check(TokenKind::Indent) {
            let found = self.cursor.describe_current();
            return Err(self
                .cursor
                .error_here(ParseErrorKind::ExpectedIndentedBlock { found }));
        }
        let pos = self.cursor.advance().pos;

        let mut statements = Vec::new();
        loop {
            self.cursor.skip_newlines();
            match self.cursor.current_kind() {
                TokenKind::Dedent => {
                    if statements.is_empty() {
                        return Err(self.cursor.error_here(ParseErrorKind::EmptyBlock));
                    }
                    self.cursor.advance();
                    break;
                }
                TokenKind::Eof => {
                    if statements.is_empty() {
                        return Err(self.cursor.error_here(ParseErrorKind::EmptyBlock));
                    }
                    break;
                }
                _ => statements.push(self.parse_statement()?),
            }
        }
        Ok(Block { statements, pos })
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
        )
    }

    /// A simple statement ends at a newline. A block's closing `Dedent` or
    /// the end of input also terminate it and are left for the caller.
    fn expect_statement_end(&mut self) -> Result<(), ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Newline => {
                self.cursor.advance();
                Ok(())
            }
            TokenKind::Dedent | TokenKind::Eof => Ok(()),
            _ => Err(self.cursor.make_expect_error("end of statement")),
        }
    }
}
