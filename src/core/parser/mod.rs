//! Expression parsing
//!
//! Recursive descent over the token stream produced by [`lexer::tokenize`].
//! Precedence, lowest first:
//!
//! 1. `+` `-`
//! 2. `*` `/` `%`
//! 3. unary `-` / `+`
//! 4. `^` (right associative, so `-2^2` is `-(2^2)` and `2^3^2` is `2^(3^2)`)
//! 5. numbers, variables, `name(expr)` calls, parenthesized expressions
//!
//! Trees taller than [`MAX_DEPTH`] are rejected with [`ParseError::TooDeep`].

pub mod lexer;

use std::fmt;

use crate::error::ParseError;
use crate::models::{Operation, Value};

pub use lexer::{tokenize, Token, TokenKind};

/// Parsed expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Value),
    Variable(String),
    Negate(Box<Expr>),
    Binary {
        op: Operation,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: String,
        argument: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: Operation, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Negate(inner) => write!(f, "(-{})", inner),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Call { function, argument } => write!(f, "{}({})", function, argument),
        }
    }
}

/// Deepest expression tree (and parser recursion) accepted
pub const MAX_DEPTH: usize = 256;

/// Parse a full expression; trailing input is an error
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        nesting: 0,
    };
    let (expr, _) = parser.expression()?;

    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(unexpected(token)),
    }
}

/// A parsed subtree together with its height
type Node = (Expr, usize);

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nesting: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it is one of the given operators
    fn take_operator(&mut self, allowed: &[Operation]) -> Option<Operation> {
        let op = match self.peek() {
            Some(Token {
                kind: TokenKind::Operator(op),
                ..
            }) if allowed.contains(op) => *op,
            _ => return None,
        };
        self.pos += 1;
        Some(op)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        match self.advance() {
            Some(token) if token.kind == kind => Ok(()),
            Some(token) => Err(unexpected(&token)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Recurse into `rule`, refusing to go deeper than [`MAX_DEPTH`]
    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<Node, ParseError>,
    ) -> Result<Node, ParseError> {
        if self.nesting >= MAX_DEPTH {
            return Err(ParseError::TooDeep(MAX_DEPTH));
        }
        self.nesting += 1;
        let result = rule(self);
        self.nesting -= 1;
        result
    }

    fn expression(&mut self) -> Result<Node, ParseError> {
        let (mut lhs, mut height) = self.term()?;
        while let Some(op) = self.take_operator(&[Operation::Add, Operation::Subtract]) {
            let (rhs, rhs_height) = self.term()?;
            height = grow(height.max(rhs_height))?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok((lhs, height))
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        let (mut lhs, mut height) = self.unary()?;
        while let Some(op) = self.take_operator(&[
            Operation::Multiply,
            Operation::Divide,
            Operation::Remainder,
        ]) {
            let (rhs, rhs_height) = self.unary()?;
            height = grow(height.max(rhs_height))?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok((lhs, height))
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if self.take_operator(&[Operation::Subtract]).is_some() {
            let (inner, height) = self.nested(Self::unary)?;
            return Ok((Expr::Negate(Box::new(inner)), grow(height)?));
        }
        if self.take_operator(&[Operation::Add]).is_some() {
            return self.nested(Self::unary);
        }
        self.power()
    }

    fn power(&mut self) -> Result<Node, ParseError> {
        let (base, base_height) = self.primary()?;
        if self.take_operator(&[Operation::Power]).is_some() {
            // Exponent may itself be signed: 2^-1
            let (exponent, exponent_height) = self.nested(Self::unary)?;
            let height = grow(base_height.max(exponent_height))?;
            return Ok((Expr::binary(Operation::Power, base, exponent), height));
        }
        Ok((base, base_height))
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let token = self.advance().ok_or(ParseError::UnexpectedEnd)?;
        let position = token.position;
        match token.kind {
            TokenKind::Number(value) => Ok((Expr::Number(value), 1)),
            TokenKind::Identifier(name) => {
                let is_call = matches!(
                    self.peek(),
                    Some(Token {
                        kind: TokenKind::LeftParen,
                        ..
                    })
                );
                if is_call {
                    self.pos += 1;
                    let (argument, height) = self.nested(Self::expression)?;
                    self.expect(TokenKind::RightParen)?;
                    let call = Expr::Call {
                        function: name,
                        argument: Box::new(argument),
                    };
                    Ok((call, grow(height)?))
                } else {
                    Ok((Expr::Variable(name), 1))
                }
            }
            TokenKind::LeftParen => {
                let inner = self.nested(Self::expression)?;
                self.expect(TokenKind::RightParen)?;
                Ok(inner)
            }
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                position,
            }),
        }
    }
}

fn grow(height: usize) -> Result<usize, ParseError> {
    if height >= MAX_DEPTH {
        return Err(ParseError::TooDeep(MAX_DEPTH));
    }
    Ok(height + 1)
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.kind.to_string(),
        position: token.position,
    }
}
