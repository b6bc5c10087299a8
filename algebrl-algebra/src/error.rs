//! Errors of parsing and rewriting equations.
use thiserror::Error;

/// Malformed equation text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text has no `=`.
    #[error("equation {0:?} has no '='")]
    MissingSeparator(String),

    /// The text has more than one `=`.
    #[error("equation {0:?} has more than one '='")]
    MultipleSeparators(String),

    /// One side of the equation is blank.
    #[error("{0} side of the equation is empty")]
    EmptySide(&'static str),

    /// A character that does not start any token.
    #[error("unexpected character {text:?} at {pos}")]
    UnexpectedChar {
        /// Byte offset in the side being parsed.
        pos: usize,
        /// The offending text.
        text: String,
    },

    /// A token that does not fit the grammar.
    #[error("unexpected {found:?} at {pos}, expected {expected}")]
    UnexpectedToken {
        /// Byte offset in the side being parsed.
        pos: usize,
        /// The offending text.
        found: String,
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// The expression ended too early.
    #[error("unexpected end of expression, expected {0}")]
    UnexpectedEnd(&'static str),

    /// A numeric literal that does not fit the number type.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    /// An exponent that is not a non-negative integer constant.
    #[error("exponent {0:?} is not a non-negative integer")]
    InvalidExponent(String),

    /// Division by an expression that depends on the variable.
    #[error("division by non-constant expression {0:?}")]
    NonConstantDivisor(String),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// More than one distinct symbol.
    #[error("more than one variable: {0} and {1}")]
    MultipleVariables(String, String),
}

/// Failure of an algebraic operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    /// The equation text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A coefficient does not fit in a 64-bit rational.
    #[error("arithmetic overflow")]
    Overflow,

    /// A polynomial exceeds the supported degree.
    #[error("polynomial degree {0} exceeds the limit of {max}", max = crate::poly::MAX_DEGREE)]
    DegreeTooLarge(usize),

    /// The equation is not linear in its variable.
    #[error("equation of degree {0} is not linear")]
    Nonlinear(usize),
}

/// Result type of this crate.
pub type Result<T> = std::result::Result<T, AlgebraError>;
