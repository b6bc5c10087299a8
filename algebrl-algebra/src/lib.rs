//! Parsing and rewriting of linear equations in one variable.
//!
//! An [`Equation`] is a pair of [`Expr`] trees kept in a normal form (see [`expr`]). The
//! operations the environment rewrites equations with are free functions:
//!
//! ```
//! use algebrl_algebra::{equivalent, expand, parse, solve, Rational};
//!
//! let eq = parse("3(x - 2) + 5 = 2x + 11").unwrap();
//! let expanded = expand(&eq).unwrap();
//! assert_eq!(expanded.to_string(), "3*x - 1 = 2*x + 11");
//! assert!(equivalent(&eq, &expanded).unwrap());
//! assert_eq!(solve(&expanded).unwrap(), Some(Rational::from_integer(12)));
//! ```
//!
//! Coefficients are 64-bit rationals; every operation fails with a typed
//! [`AlgebraError`] instead of panicking on overflow or malformed input.
mod adapter;
mod equation;
mod error;
pub mod expr;
mod lexer;
mod parser;
mod poly;
mod text;

pub use adapter::{
    equivalent, expand, isolate_constant, isolate_variable_part, parse, simplify, solve,
    subtract_term, DEFAULT_VAR,
};
pub use equation::Equation;
pub use error::{AlgebraError, ParseError, Result};
pub use expr::Expr;
pub use poly::{Poly, MAX_DEGREE};
pub use text::{clean_text, normalize_problem_text};

/// Exact numbers of the algebra.
pub type Rational = num_rational::Ratio<i64>;
