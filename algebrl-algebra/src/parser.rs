//! Recursive-descent parser for one side of an equation.
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary | power)*
//! unary   := ('+' | '-') unary | power
//! power   := atom (('^' | '**') unary)?
//! atom    := NUMBER | IDENT | '(' sum ')'
//! ```
//!
//! A `power` directly following a factor is an implicit product, as in `3(x - 2)` or `2x`.
use crate::{
    error::{ParseError, Result},
    expr::{in_range, Expr},
    lexer::{lex, Token, TokenKind},
    Rational,
};
use num_traits::Zero;

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

fn unexpected(token: &Token<'_>, expected: &'static str) -> ParseError {
    ParseError::UnexpectedToken {
        pos: token.span.start,
        found: token.text.to_string(),
        expected,
    }
}

fn parse_number(text: &str) -> std::result::Result<Rational, ParseError> {
    let invalid = || ParseError::InvalidNumber(text.to_string());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
    let numer: i64 = format!("{}{}", int_part, frac_part)
        .parse()
        .map_err(|_| invalid())?;
    let denom = 10i64
        .checked_pow(frac_part.len() as u32)
        .ok_or_else(invalid)?;
    Ok(Rational::new(numer, denom))
}

fn reciprocal(divisor: Expr) -> Result<Expr> {
    match divisor.normalize()? {
        Expr::Num(n) if n.is_zero() => Err(ParseError::DivisionByZero.into()),
        Expr::Num(n) => Ok(Expr::Num(in_range(Some(n))?.recip())),
        e => Err(ParseError::NonConstantDivisor(e.to_string()).into()),
    }
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Result<Self> {
        Ok(Self {
            tokens: lex(source)?,
            pos: 0,
        })
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_full(&mut self) -> Result<Expr> {
        let expr = self.parse_sum()?;
        match self.tokens.get(self.pos) {
            None => Ok(expr),
            Some(token) => Err(unexpected(token, "an operator").into()),
        }
    }

    fn parse_sum(&mut self) -> Result<Expr> {
        let mut terms = vec![self.parse_product()?];
        loop {
            match self.peek_kind() {
                Some(TokenKind::Plus) => {
                    self.bump();
                    terms.push(self.parse_product()?);
                }
                Some(TokenKind::Minus) => {
                    self.bump();
                    terms.push(-self.parse_product()?);
                }
                _ => break,
            }
        }
        Ok(match terms.len() {
            1 => terms.remove(0),
            _ => Expr::Add(terms),
        })
    }

    fn parse_product(&mut self) -> Result<Expr> {
        let mut factors = vec![self.parse_unary()?];
        loop {
            match self.peek_kind() {
                Some(TokenKind::Star) => {
                    self.bump();
                    factors.push(self.parse_unary()?);
                }
                Some(TokenKind::Slash) => {
                    self.bump();
                    let divisor = self.parse_unary()?;
                    factors.push(reciprocal(divisor)?);
                }
                Some(TokenKind::Ident | TokenKind::LParen) => factors.push(self.parse_power()?),
                _ => break,
            }
        }
        Ok(match factors.len() {
            1 => factors.remove(0),
            _ => Expr::Mul(factors),
        })
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.bump();
                Ok(-self.parse_unary()?)
            }
            Some(TokenKind::Plus) => {
                self.bump();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_atom()?;
        if self.peek_kind() != Some(TokenKind::Pow) {
            return Ok(base);
        }
        self.bump();

        let exponent = self.parse_unary()?.normalize()?;
        let e = match &exponent {
            Expr::Num(n) if n.is_integer() => u32::try_from(*n.numer()).ok(),
            _ => None,
        };
        match e {
            Some(e) => Ok(Expr::Pow(Box::new(base), e)),
            None => Err(ParseError::InvalidExponent(exponent.to_string()).into()),
        }
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        let Some(token) = self.bump() else {
            return Err(ParseError::UnexpectedEnd("an operand").into());
        };
        match token.kind {
            TokenKind::Number => Ok(Expr::Num(parse_number(token.text)?)),
            TokenKind::Ident => Ok(Expr::sym(token.text)),
            TokenKind::LParen => {
                let inner = self.parse_sum()?;
                match self.bump() {
                    Some(t) if t.kind == TokenKind::RParen => Ok(inner),
                    Some(t) => Err(unexpected(&t, "')'").into()),
                    None => Err(ParseError::UnexpectedEnd("')'").into()),
                }
            }
            _ => Err(unexpected(&token, "an operand").into()),
        }
    }
}

/// Parses an expression into its normal form.
pub fn parse_expr(source: &str) -> Result<Expr> {
    Parser::new(source)?.parse_full()?.normalize()
}
