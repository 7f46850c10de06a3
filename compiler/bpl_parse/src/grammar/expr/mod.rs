//! Expression parsing.
//!
//! Binary operators are parsed by a chain of functions, one per
//! precedence level, loosest first:
//!
//! ```text
//! বা  →  এবং  →  না  →  == !=  →  < <= > >=  →  + -  →  * / %  →  unary -  →  call  →  primary
//! ```
//!
//! All binary operators are left-associative.

mod operators;

use bpl_ir::{BinaryOp, Expr, ExprKind, Literal, TokenKind, UnaryOp};
use bpl_lexer::Keyword;
use bpl_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse an expression.
    #[inline]
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_binary_or())
    }

    /// Parse one left-associative precedence level.
    fn parse_binary_level(
        &mut self,
        mut next: impl FnMut(&mut Self) -> Result<Expr, ParseError>,
        match_op: impl Fn(&Self) -> Option<BinaryOp>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        while let Some(op) = match_op(self) {
            self.cursor.advance();
            let right = next(self)?;
            let pos = left.pos;
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                pos,
            );
        }
        Ok(left)
    }

    /// `or_expr = and_expr { "বা" and_expr }`
    fn parse_binary_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_binary_and, |p| {
            p.cursor.check(TokenKind::Or).then_some(BinaryOp::Or)
        })
    }

    /// `and_expr = not_expr { "এবং" not_expr }`
    fn parse_binary_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_not, |p| {
            p.cursor.check(TokenKind::And).then_some(BinaryOp::And)
        })
    }

    /// `not_expr = "না" not_expr | equality`
    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if !self.cursor.check(TokenKind::Not) {
            return self.parse_equality();
        }
        let pos = self.cursor.advance().pos;
        let operand = ensure_sufficient_stack(|| self.parse_not())?;
        Ok(Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            },
            pos,
        ))
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_comparison, Self::match_equality_op)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_additive, Self::match_comparison_op)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_multiplicative, Self::match_additive_op)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_unary, Self::match_multiplicative_op)
    }

    /// `unary = "-" unary | call`
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if !self.cursor.check(TokenKind::Minus) {
            return self.parse_call();
        }
        let pos = self.cursor.advance().pos;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            },
            pos,
        ))
    }

    /// `call = primary { "(" [ expr { "," expr } ] ")" }`
    fn parse_call(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        while self.cursor.check(TokenKind::LParen) {
            self.cursor.advance();
            let args = self.in_error_context(ErrorContext::FunctionCall, |p| {
                let args = p.parse_call_args()?;
                p.cursor.expect(TokenKind::RParen)?;
                Ok(args)
            })?;
            let pos = expr.pos;
            expr = Expr::new(
                ExprKind::Call {
                    callee: Box::new(expr),
                    args,
                },
                pos,
            );
        }
        Ok(expr)
    }

    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            args.push(self.parse_expr()?);
            if !self.cursor.check(TokenKind::Comma) {
                break;
            }
            self.cursor.advance();
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let pos = token.pos;
        let kind = match token.kind {
            TokenKind::Int(n) => ExprKind::Literal(Literal::Int(n)),
            TokenKind::Float(bits) => ExprKind::Literal(Literal::Float(f64::from_bits(bits))),
            TokenKind::Str(name) => ExprKind::Literal(Literal::Str(name)),
            TokenKind::True => ExprKind::Literal(Literal::Bool(true)),
            TokenKind::False => ExprKind::Literal(Literal::Bool(false)),
            TokenKind::Nil => ExprKind::Literal(Literal::Nil),
            TokenKind::Ident(name) => ExprKind::Ident(name),
            // The print keyword names the print builtin.
            TokenKind::Print => {
                ExprKind::Ident(self.cursor.interner().intern(Keyword::Print.canonical()))
            }
            TokenKind::LParen => {
                self.cursor.advance();
                return self.in_error_context(ErrorContext::Parenthesized, |p| {
                    let inner = p.parse_expr()?;
                    p.cursor.expect(TokenKind::RParen)?;
                    Ok(inner)
                });
            }
            _ => {
                let found = self.cursor.describe_current();
                return Err(self
                    .cursor
                    .error_here(ParseErrorKind::ExpectedExpression { found }));
            }
        };
        self.cursor.advance();
        Ok(Expr::new(kind, pos))
    }
}
