//! Two-sided equations.
use crate::{error::Result, expr::Expr, poly::Poly};
use std::{fmt, str::FromStr};

/// An equation `lhs = rhs` in a single variable.
///
/// Structural equality (`==`) compares the trees; use
/// [`equivalent`](crate::equivalent) for algebraic equivalence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equation {
    lhs: Expr,
    rhs: Expr,
    var: String,
}

impl Equation {
    /// Builds an equation in the variable `var`.
    pub fn new(lhs: Expr, rhs: Expr, var: impl Into<String>) -> Self {
        Self {
            lhs,
            rhs,
            var: var.into(),
        }
    }

    /// The left side.
    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    /// The right side.
    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    /// The name of the variable.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// The polynomial `lhs - rhs`.
    pub fn residual(&self) -> Result<Poly> {
        Poly::from_expr(&self.lhs)?.checked_sub(&Poly::from_expr(&self.rhs)?)
    }

    /// Applies `f` to both sides.
    pub fn map_sides(&self, mut f: impl FnMut(&Expr) -> Result<Expr>) -> Result<Self> {
        Ok(Self {
            lhs: f(&self.lhs)?,
            rhs: f(&self.rhs)?,
            var: self.var.clone(),
        })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

impl FromStr for Equation {
    type Err = crate::AlgebraError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse(s)
    }
}
