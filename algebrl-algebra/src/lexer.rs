//! Tokenizer for one side of an equation.
use crate::error::ParseError;
use logos::Logos;
use std::ops::Range;

/// Token kinds recognized by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// Integer or decimal literal.
    #[regex(r"[0-9]+(\.[0-9]+)?|\.[0-9]+")]
    Number,

    /// Symbol name.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    #[token("×")]
    Star,

    #[token("/")]
    #[token("÷")]
    Slash,

    /// `^` or `**`.
    #[token("^")]
    #[token("**")]
    Pow,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("=")]
    Eq,
}

/// A token with its kind, span and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub span: Range<usize>,
    pub text: &'a str,
}

/// Lexes an expression into tokens.
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(kind) => kind,
            Err(_) => {
                return Err(ParseError::UnexpectedChar {
                    pos: span.start,
                    text: source[span].to_string(),
                })
            }
        };
        tokens.push(Token {
            kind,
            text: &source[span.clone()],
            span,
        });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_implicit_product() {
        use TokenKind::*;
        assert_eq!(
            kinds("3(x - 2) + 5"),
            vec![Number, LParen, Ident, Minus, Number, RParen, Plus, Number]
        );
        assert_eq!(kinds("2x"), vec![Number, Ident]);
    }

    #[test]
    fn test_lex_powers() {
        use TokenKind::*;
        assert_eq!(kinds("x**2"), vec![Ident, Pow, Number]);
        assert_eq!(kinds("x^2"), vec![Ident, Pow, Number]);
        assert_eq!(kinds("2 * x"), vec![Number, Star, Ident]);
    }

    #[test]
    fn test_lex_decimal() {
        let tokens = lex("0.25x").unwrap();
        assert_eq!(tokens[0].text, "0.25");
        assert_eq!(tokens[1].text, "x");
    }

    #[test]
    fn test_lex_unexpected_char() {
        assert_eq!(
            lex("2x + $").unwrap_err(),
            ParseError::UnexpectedChar {
                pos: 5,
                text: "$".to_string()
            }
        );
    }
}
