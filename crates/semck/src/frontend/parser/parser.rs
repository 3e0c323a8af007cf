//! Recursive descent parser

use crate::common::{CheckError, CheckResult, Span};
use crate::frontend::ast::*;
use crate::frontend::lexer::{Lexer, Token, TokenKind};

/// Deepest nesting of blocks, parenthesized expressions and unary operators
const MAX_NESTING: usize = 100;

/// Recursive descent parser producing a [`Program`]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    /// End of the most recently consumed token
    prev_end: usize,
    /// Current nesting level, bounded by [`MAX_NESTING`]
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str) -> CheckResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            prev_end: 0,
            depth: 0,
        })
    }

    /// Parse a complete program
    pub fn parse(&mut self) -> CheckResult<Program> {
        let start = self.current.span;
        let mut stmts = Vec::new();

        while !self.at_end() {
            stmts.push(self.parse_statement()?);
        }

        Ok(Program::new(stmts, start.merge(self.current.span)))
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> CheckResult<Token> {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        self.prev_end = prev.span.end;
        Ok(prev)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> CheckResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> CheckResult<Token> {
        if self.check(&kind) {
            self.advance()
        } else {
            Err(CheckError::parser(
                format!("expected {}, found {}", kind, self.current.kind),
                self.current.span,
            ))
        }
    }

    fn expect_identifier(&mut self) -> CheckResult<(String, Span)> {
        if let TokenKind::Identifier(name) = &self.current.kind {
            let name = name.clone();
            let token = self.advance()?;
            Ok((name, token.span))
        } else {
            Err(CheckError::parser(
                format!("expected identifier, found {}", self.current.kind),
                self.current.span,
            ))
        }
    }

    /// Span from `start` to the end of the last consumed token
    fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.prev_end.max(start.end))
    }

    /// Run `parse` one nesting level deeper, failing once the limit is reached
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> CheckResult<T>) -> CheckResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(CheckError::parser(
                format!("nesting deeper than {MAX_NESTING} levels"),
                self.current.span,
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> CheckResult<Stmt> {
        match &self.current.kind {
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                let span = block.span;
                Ok(Stmt::new(StmtKind::Block(block), span))
            }

            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_while_statement(),

            _ if self.current.kind.is_type_keyword() => self.parse_declaration(),

            TokenKind::Identifier(_) => {
                // `T x ...` declares with a non-builtin type name, `x = ...` assigns
                let next = &self.lexer.peek()?.kind;
                let is_declaration = matches!(next, TokenKind::Identifier(_));
                let is_assignment = matches!(next, TokenKind::Eq);

                if is_declaration {
                    self.parse_declaration()
                } else if is_assignment {
                    self.parse_assignment()
                } else {
                    self.parse_expression_statement()
                }
            }

            _ => self.parse_expression_statement(),
        }
    }

    fn parse_block(&mut self) -> CheckResult<Block> {
        self.nested(|parser| {
            let start_span = parser.current.span;
            parser.expect(TokenKind::LBrace)?;

            let mut stmts = Vec::new();
            while !parser.check(&TokenKind::RBrace) && !parser.at_end() {
                stmts.push(parser.parse_statement()?);
            }

            parser.expect(TokenKind::RBrace)?;
            Ok(Block::new(stmts, parser.span_from(start_span)))
        })
    }

    fn parse_declaration(&mut self) -> CheckResult<Stmt> {
        let start_span = self.current.span;

        let type_name = match self.current.kind.type_name() {
            Some(name) => {
                self.advance()?;
                name.to_string()
            }
            None => self.expect_identifier()?.0,
        };
        let (name, name_span) = self.expect_identifier()?;

        let init = if self.match_token(&TokenKind::Eq)? {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenKind::Semi)?;
        let span = self.span_from(start_span);

        let mut decl = Declaration::new(type_name, name, name_span, span);
        if let Some(init) = init {
            decl = decl.with_init(init);
        }

        Ok(Stmt::new(StmtKind::Declare(decl), span))
    }

    fn parse_assignment(&mut self) -> CheckResult<Stmt> {
        let start_span = self.current.span;
        let (target, target_span) = self.expect_identifier()?;
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semi)?;

        Ok(Stmt::new(
            StmtKind::Assign {
                target,
                target_span,
                value,
            },
            self.span_from(start_span),
        ))
    }

    fn parse_condition(&mut self) -> CheckResult<Expr> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }

    fn parse_if_statement(&mut self) -> CheckResult<Stmt> {
        let start_span = self.current.span;
        self.expect(TokenKind::If)?;
        let condition = self.parse_condition()?;
        let then_block = self.parse_block()?;

        let else_block = if self.match_token(&TokenKind::Else)? {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_block,
                else_block,
            },
            self.span_from(start_span),
        ))
    }

    fn parse_while_statement(&mut self) -> CheckResult<Stmt> {
        let start_span = self.current.span;
        self.expect(TokenKind::While)?;
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;

        Ok(Stmt::new(StmtKind::While { condition, body }, self.span_from(start_span)))
    }

    fn parse_do_while_statement(&mut self) -> CheckResult<Stmt> {
        let start_span = self.current.span;
        self.expect(TokenKind::Do)?;
        let body = self.parse_block()?;
        self.expect(TokenKind::While)?;
        let condition = self.parse_condition()?;
        self.expect(TokenKind::Semi)?;

        Ok(Stmt::new(StmtKind::DoWhile { body, condition }, self.span_from(start_span)))
    }

    fn parse_expression_statement(&mut self) -> CheckResult<Stmt> {
        let start_span = self.current.span;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semi)?;

        Ok(Stmt::new(StmtKind::Expr(expr), self.span_from(start_span)))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression(&mut self) -> CheckResult<Expr> {
        self.nested(Self::parse_conditional_expression)
    }

    fn parse_conditional_expression(&mut self) -> CheckResult<Expr> {
        let start_span = self.current.span;
        let condition = self.parse_logical_expression()?;

        if self.match_token(&TokenKind::Question)? {
            let then_expr = self.parse_expression()?;
            self.expect(TokenKind::Colon)?;
            let else_expr = self.parse_expression()?;

            return Ok(Expr::new(
                ExprKind::Ternary {
                    condition: Box::new(condition),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                },
                self.span_from(start_span),
            ));
        }

        Ok(condition)
    }

    /// `&&` and `||` form a single chain
    fn parse_logical_expression(&mut self) -> CheckResult<Expr> {
        let start_span = self.current.span;
        let first = self.parse_comparison_expression()?;

        let mut rest = Vec::new();
        loop {
            let op = match &self.current.kind {
                TokenKind::AmpAmp => LogicOp::And,
                TokenKind::PipePipe => LogicOp::Or,
                _ => break,
            };
            self.advance()?;
            rest.push((op, self.parse_comparison_expression()?));
        }

        if rest.is_empty() {
            return Ok(first);
        }
        Ok(Expr::new(
            ExprKind::Logical(Chain::new(first, rest)),
            self.span_from(start_span),
        ))
    }

    /// Comparisons do not chain: at most one operator
    fn parse_comparison_expression(&mut self) -> CheckResult<Expr> {
        let start_span = self.current.span;
        let left = self.parse_additive_expression()?;

        let op = match &self.current.kind {
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::LtEq => CompareOp::Le,
            TokenKind::GtEq => CompareOp::Ge,
            TokenKind::EqEq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::Ne,
            _ => return Ok(left),
        };
        self.advance()?;
        let right = self.parse_additive_expression()?;

        if self.current.kind.is_comparison_op() {
            return Err(CheckError::parser(
                format!("comparison operators cannot be chained, found {}", self.current.kind),
                self.current.span,
            ));
        }

        Ok(Expr::new(
            ExprKind::Compare {
                left: Box::new(left),
                rhs: Some((op, Box::new(right))),
            },
            self.span_from(start_span),
        ))
    }

    fn parse_additive_expression(&mut self) -> CheckResult<Expr> {
        let start_span = self.current.span;
        let first = self.parse_multiplicative_expression()?;

        let mut rest = Vec::new();
        loop {
            let op = match &self.current.kind {
                TokenKind::Plus => AddOp::Add,
                TokenKind::Minus => AddOp::Sub,
                _ => break,
            };
            self.advance()?;
            rest.push((op, self.parse_multiplicative_expression()?));
        }

        if rest.is_empty() {
            return Ok(first);
        }
        Ok(Expr::new(
            ExprKind::Additive(Chain::new(first, rest)),
            self.span_from(start_span),
        ))
    }

    fn parse_multiplicative_expression(&mut self) -> CheckResult<Expr> {
        let start_span = self.current.span;
        let first = self.parse_unary_expression()?;

        let mut rest = Vec::new();
        loop {
            let op = match &self.current.kind {
                TokenKind::Star => MulOp::Mul,
                TokenKind::Slash => MulOp::Div,
                TokenKind::Percent => MulOp::Mod,
                _ => break,
            };
            self.advance()?;
            rest.push((op, self.parse_unary_expression()?));
        }

        if rest.is_empty() {
            return Ok(first);
        }
        Ok(Expr::new(
            ExprKind::Multiplicative(Chain::new(first, rest)),
            self.span_from(start_span),
        ))
    }

    fn parse_unary_expression(&mut self) -> CheckResult<Expr> {
        let start_span = self.current.span;

        let op = match &self.current.kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_primary_expression(),
        };
        self.advance()?;
        let operand = self.nested(Self::parse_unary_expression)?;

        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            self.span_from(start_span),
        ))
    }

    fn parse_primary_expression(&mut self) -> CheckResult<Expr> {
        let span = self.current.span;

        match &self.current.kind {
            TokenKind::IntLiteral(digits) => {
                let digits = digits.clone();
                self.advance()?;
                Ok(Expr::new(ExprKind::IntLiteral(digits), span))
            }
            TokenKind::RealLiteral(s) => {
                let value = self.parse_real_literal(s)?;
                self.advance()?;
                Ok(Expr::new(ExprKind::RealLiteral(value), span))
            }
            TokenKind::True => {
                self.advance()?;
                Ok(Expr::new(ExprKind::BoolLiteral(true), span))
            }
            TokenKind::False => {
                self.advance()?;
                Ok(Expr::new(ExprKind::BoolLiteral(false), span))
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(Expr::new(ExprKind::Identifier(name), span))
            }
            TokenKind::LBracket => self.parse_list_literal(),
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(CheckError::parser(
                format!("unexpected token in expression: {}", self.current.kind),
                span,
            )),
        }
    }

    fn parse_list_literal(&mut self) -> CheckResult<Expr> {
        let start_span = self.current.span;
        self.expect(TokenKind::LBracket)?;

        let mut items = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                items.push(self.parse_expression()?);
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
        }

        self.expect(TokenKind::RBracket)?;
        Ok(Expr::new(ExprKind::List(items), self.span_from(start_span)))
    }

    // =========================================================================
    // Literal parsing helpers
    // =========================================================================

    fn parse_real_literal(&self, s: &str) -> CheckResult<f64> {
        s.parse().map_err(|_| {
            CheckError::parser(format!("invalid float literal: {s}"), self.current.span)
        })
    }
}
