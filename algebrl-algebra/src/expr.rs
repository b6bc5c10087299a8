//! Expression trees and their normal form.
//!
//! Sums and products are **flattened**: `x + (y + z)` is a single [`Expr::Add`] with three
//! terms. This makes combining like terms (`x + x = 2*x`) and like factors (`x*x = x**2`) a
//! matter of scanning one level of the tree.
//!
//! [`Expr::normalize`] brings a tree into a normal form:
//!
//! * nested sums and products are flattened,
//! * numbers are folded, the coefficient of a product comes first,
//! * like terms and like factors are combined,
//! * terms are ordered by decreasing degree with the constant last.
//!
//! Numeric coefficients are *not* distributed over sums, so `3*(x - 2) + 5` keeps its shape.
//! Use [`Poly`](crate::Poly) for the fully expanded form.
use crate::{
    error::{AlgebraError, Result},
    poly::MAX_DEGREE,
    Rational,
};
use num_traits::{CheckedAdd, CheckedMul, One, Signed, Zero};
use std::{cmp::Reverse, collections::BTreeSet, fmt, ops};

/// An algebraic expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Rational number.
    Num(Rational),

    /// Symbol.
    Sym(String),

    /// Sum of terms.
    Add(Vec<Expr>),

    /// Product of factors.
    Mul(Vec<Expr>),

    /// Non-negative integer power.
    Pow(Box<Expr>, u32),
}

impl Expr {
    /// The number zero.
    pub fn zero() -> Self {
        Expr::Num(Rational::zero())
    }

    /// The number one.
    pub fn one() -> Self {
        Expr::Num(Rational::one())
    }

    /// An integer.
    pub fn int(n: i64) -> Self {
        Expr::Num(Rational::from_integer(n))
    }

    /// A symbol.
    pub fn sym(name: impl Into<String>) -> Self {
        Expr::Sym(name.into())
    }

    /// Returns the number if the expression is one.
    pub fn as_num(&self) -> Option<&Rational> {
        match self {
            Expr::Num(n) => Some(n),
            _ => None,
        }
    }

    /// Returns `true` if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Num(n) if n.is_zero())
    }

    /// Returns `true` if a symbol occurs in the expression.
    pub fn contains_symbol(&self) -> bool {
        match self {
            Expr::Num(_) => false,
            Expr::Sym(_) => true,
            Expr::Add(es) | Expr::Mul(es) => es.iter().any(Expr::contains_symbol),
            Expr::Pow(base, _) => base.contains_symbol(),
        }
    }

    /// Returns the names of the symbols in the expression.
    pub fn symbols(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Num(_) => {}
            Expr::Sym(s) => {
                out.insert(s.as_str());
            }
            Expr::Add(es) | Expr::Mul(es) => es.iter().for_each(|e| e.collect_symbols(out)),
            Expr::Pow(base, _) => base.collect_symbols(out),
        }
    }

    /// Number of nodes in the tree. The exponent of a power counts as a node.
    pub fn complexity(&self) -> usize {
        match self {
            Expr::Num(_) | Expr::Sym(_) => 1,
            Expr::Add(es) | Expr::Mul(es) => 1 + es.iter().map(Expr::complexity).sum::<usize>(),
            Expr::Pow(base, _) => 2 + base.complexity(),
        }
    }

    /// Upper bound of the polynomial degree, used for ordering terms.
    fn degree_hint(&self) -> usize {
        match self {
            Expr::Num(_) => 0,
            Expr::Sym(_) => 1,
            Expr::Add(es) => es.iter().map(Expr::degree_hint).max().unwrap_or(0),
            Expr::Mul(es) => es.iter().map(Expr::degree_hint).sum(),
            Expr::Pow(base, e) => base.degree_hint().saturating_mul(*e as usize),
        }
    }

    /// Returns the normal form of the expression.
    ///
    /// Fails with [`AlgebraError::Overflow`] if a coefficient leaves the range of
    /// [`Rational`] and with [`AlgebraError::DegreeTooLarge`] for huge powers.
    pub fn normalize(&self) -> Result<Expr> {
        match self {
            Expr::Num(_) | Expr::Sym(_) => Ok(self.clone()),
            Expr::Pow(base, e) => normalize_pow(base.normalize()?, *e),
            Expr::Mul(fs) => normalize_mul(fs.iter().map(Expr::normalize).collect::<Result<_>>()?),
            Expr::Add(ts) => normalize_add(ts.iter().map(Expr::normalize).collect::<Result<_>>()?),
        }
    }

    /// Returns the term with its sign flipped if it would render with a leading minus.
    fn negated_for_display(&self) -> Option<Expr> {
        match self {
            Expr::Num(n) if n.is_negative() => checked_neg(n).map(Expr::Num),
            Expr::Mul(fs) => match fs.first() {
                Some(Expr::Num(c)) if c.is_negative() => {
                    let mut fs = fs.clone();
                    fs[0] = Expr::Num(checked_neg(c)?);
                    Some(with_coeff_unchecked(fs))
                }
                _ => None,
            },
            _ => None,
        }
    }
}

impl ops::Neg for Expr {
    type Output = Expr;

    /// Builds `-1 * self` without normalizing.
    fn neg(self) -> Expr {
        Expr::Mul(vec![Expr::int(-1), self])
    }
}

impl ops::Sub for Expr {
    type Output = Expr;

    /// Builds `self + (-1 * rhs)` without normalizing.
    fn sub(self, rhs: Expr) -> Expr {
        Expr::Add(vec![self, -rhs])
    }
}

/// `-r`, `None` when the numerator is `i64::MIN`.
pub(crate) fn checked_neg(r: &Rational) -> Option<Rational> {
    r.numer()
        .checked_neg()
        .map(|n| Rational::new_raw(n, *r.denom()))
}

/// Result of a checked operation on rationals.
///
/// A numerator of `i64::MIN` counts as overflow: it cannot be negated or inverted.
pub(crate) fn in_range(r: Option<Rational>) -> Result<Rational> {
    match r {
        Some(r) if *r.numer() != i64::MIN => Ok(r),
        _ => Err(AlgebraError::Overflow),
    }
}

/// `base**e` by squaring with overflow checks.
pub(crate) fn checked_pow(base: &Rational, mut e: u32) -> Result<Rational> {
    let mut acc = Rational::one();
    let mut b = *base;
    while e > 0 {
        if e & 1 == 1 {
            acc = in_range(acc.checked_mul(&b))?;
        }
        e >>= 1;
        if e > 0 {
            b = in_range(b.checked_mul(&b))?;
        }
    }
    Ok(acc)
}

fn normalize_pow(base: Expr, e: u32) -> Result<Expr> {
    match (base, e) {
        (_, 0) => Ok(Expr::one()),
        (base, 1) => Ok(base),
        (Expr::Num(n), e) => Ok(Expr::Num(checked_pow(&n, e)?)),
        (_, e) if e as usize > MAX_DEGREE => Err(AlgebraError::DegreeTooLarge(e as usize)),
        (Expr::Pow(inner, e2), e) => {
            normalize_pow(*inner, e2.checked_mul(e).ok_or(AlgebraError::Overflow)?)
        }
        (Expr::Mul(fs), e) => normalize_mul(
            fs.into_iter()
                .map(|f| normalize_pow(f, e))
                .collect::<Result<_>>()?,
        ),
        (base, e) => Ok(Expr::Pow(Box::new(base), e)),
    }
}

/// Ordering of factors in a product: symbols and their powers first.
fn factor_key(factor: &Expr) -> (u8, String) {
    let rank = match factor {
        Expr::Sym(_) => 0,
        Expr::Pow(base, _) if matches!(**base, Expr::Sym(_)) => 0,
        _ => 1,
    };
    (rank, factor.to_string())
}

/// Ordering of terms in a sum: decreasing degree.
fn term_key(term: &Expr) -> (Reverse<usize>, String) {
    (Reverse(term.degree_hint()), term.to_string())
}

fn normalize_mul(factors: Vec<Expr>) -> Result<Expr> {
    let mut coeff = Rational::one();
    let mut powers: Vec<(Expr, u32)> = vec![];

    let flat = factors.into_iter().flat_map(|f| match f {
        Expr::Mul(inner) => inner,
        f => vec![f],
    });
    for factor in flat {
        let (base, e) = match factor {
            Expr::Num(n) => {
                coeff = in_range(coeff.checked_mul(&n))?;
                continue;
            }
            Expr::Pow(base, e) => (*base, e),
            f => (f, 1),
        };
        match powers.iter_mut().find(|(b, _)| *b == base) {
            Some((_, acc)) => *acc = acc.checked_add(e).ok_or(AlgebraError::Overflow)?,
            None => powers.push((base, e)),
        }
    }

    if coeff.is_zero() {
        return Ok(Expr::zero());
    }

    let mut rest = powers
        .into_iter()
        .map(|(base, e)| match e {
            1 => Ok(base),
            e if e as usize > MAX_DEGREE => Err(AlgebraError::DegreeTooLarge(e as usize)),
            e => Ok(Expr::Pow(Box::new(base), e)),
        })
        .collect::<Result<Vec<_>>>()?;
    rest.sort_by_cached_key(factor_key);

    with_coeff(coeff, product(rest))
}

fn normalize_add(terms: Vec<Expr>) -> Result<Expr> {
    let mut constant = Rational::zero();
    let mut like: Vec<(Expr, Rational)> = vec![];

    let flat = terms.into_iter().flat_map(|t| match t {
        Expr::Add(inner) => inner,
        t => vec![t],
    });
    for term in flat {
        if let Expr::Num(n) = term {
            constant = in_range(constant.checked_add(&n))?;
            continue;
        }
        let (c, rest) = split_coeff(term);
        match like.iter_mut().find(|(r, _)| *r == rest) {
            Some((_, acc)) => *acc = in_range(acc.checked_add(&c))?,
            None => like.push((rest, c)),
        }
    }

    let mut out = like
        .into_iter()
        .filter(|(_, c)| !c.is_zero())
        .map(|(rest, c)| with_coeff(c, rest))
        .collect::<Result<Vec<_>>>()?;
    out.sort_by_cached_key(term_key);
    if !constant.is_zero() {
        out.push(Expr::Num(constant));
    }

    Ok(match out.len() {
        0 => Expr::zero(),
        1 => out.remove(0),
        _ => Expr::Add(out),
    })
}

/// Splits a normalized term into its numeric coefficient and the rest.
pub(crate) fn split_coeff(term: Expr) -> (Rational, Expr) {
    if let Expr::Mul(fs) = &term {
        if let Some(Expr::Num(c)) = fs.first() {
            return (*c, product(fs[1..].to_vec()));
        }
    }
    (Rational::one(), term)
}

fn product(mut factors: Vec<Expr>) -> Expr {
    match factors.len() {
        0 => Expr::one(),
        1 => factors.remove(0),
        _ => Expr::Mul(factors),
    }
}

/// `c * rest` for a normalized `rest` without a coefficient.
fn with_coeff(c: Rational, rest: Expr) -> Result<Expr> {
    if c.is_one() {
        return Ok(rest);
    }
    Ok(match rest {
        Expr::Num(n) => Expr::Num(in_range(c.checked_mul(&n))?),
        Expr::Mul(mut fs) => {
            fs.insert(0, Expr::Num(c));
            Expr::Mul(fs)
        }
        rest => Expr::Mul(vec![Expr::Num(c), rest]),
    })
}

/// Drops a unit coefficient from a product built for display.
fn with_coeff_unchecked(fs: Vec<Expr>) -> Expr {
    match fs.first() {
        Some(Expr::Num(c)) if c.is_one() => product(fs[1..].to_vec()),
        _ => product(fs),
    }
}

fn write_factor(f: &mut fmt::Formatter<'_>, factor: &Expr) -> fmt::Result {
    match factor {
        Expr::Add(_) | Expr::Mul(_) => write!(f, "({})", factor),
        Expr::Num(n) if n.is_negative() || !n.is_integer() => write!(f, "({})", factor),
        _ => write!(f, "{}", factor),
    }
}

fn write_mul(f: &mut fmt::Formatter<'_>, factors: &[Expr]) -> fmt::Result {
    let (coeff, rest) = match factors.first() {
        Some(Expr::Num(c)) => (*c, &factors[1..]),
        _ => (Rational::one(), factors),
    };
    if rest.is_empty() {
        return write!(f, "{}", coeff);
    }

    if coeff.is_negative() {
        write!(f, "-")?;
    }
    let numer = coeff.numer().unsigned_abs();
    if numer != 1 {
        write!(f, "{}*", numer)?;
    }
    for (i, factor) in rest.iter().enumerate() {
        if i > 0 {
            write!(f, "*")?;
        }
        write_factor(f, factor)?;
    }
    if *coeff.denom() != 1 {
        write!(f, "/{}", coeff.denom())?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Sym(s) => write!(f, "{}", s),
            Expr::Add(ts) if ts.is_empty() => write!(f, "0"),
            Expr::Add(ts) => {
                for (i, t) in ts.iter().enumerate() {
                    match (i, t.negated_for_display()) {
                        (0, _) => write!(f, "{}", t)?,
                        (_, Some(pos)) => write!(f, " - {}", pos)?,
                        (_, None) => write!(f, " + {}", t)?,
                    }
                }
                Ok(())
            }
            Expr::Mul(fs) => write_mul(f, fs),
            Expr::Pow(base, e) => {
                match **base {
                    Expr::Sym(_) => write!(f, "{}", base)?,
                    Expr::Num(n) if !n.is_negative() && n.is_integer() => write!(f, "{}", base)?,
                    _ => write!(f, "({})", base)?,
                }
                write!(f, "**{}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::sym("x")
    }

    fn frac(n: i64, d: i64) -> Expr {
        Expr::Num(Rational::new(n, d))
    }

    #[test]
    fn test_combine_like_terms() {
        // x + x + 2 + 3 = 2*x + 5
        let e = Expr::Add(vec![x(), Expr::int(2), x(), Expr::int(3)]);
        let n = e.normalize().unwrap();
        assert_eq!(
            n,
            Expr::Add(vec![Expr::Mul(vec![Expr::int(2), x()]), Expr::int(5)])
        );
        assert_eq!(n.to_string(), "2*x + 5");
    }

    #[test]
    fn test_cancelling_terms() {
        let e = x() - x();
        assert_eq!(e.normalize().unwrap(), Expr::zero());
    }

    #[test]
    fn test_like_factors() {
        let e = Expr::Mul(vec![x(), Expr::int(3), x()]);
        assert_eq!(e.normalize().unwrap().to_string(), "3*x**2");
    }

    #[test]
    fn test_no_distribution() {
        // 3*(x - 2) + 5 keeps its shape
        let e = Expr::Add(vec![
            Expr::Mul(vec![Expr::int(3), x() - Expr::int(2)]),
            Expr::int(5),
        ]);
        let n = e.normalize().unwrap();
        assert_eq!(n.to_string(), "3*(x - 2) + 5");
        assert_eq!(n.normalize().unwrap(), n);
    }

    #[test]
    fn test_render_signs_and_fractions() {
        let e = Expr::Add(vec![Expr::int(11), -x()]);
        assert_eq!(e.normalize().unwrap().to_string(), "-x + 11");

        let e = Expr::Mul(vec![frac(3, 2), x()]);
        assert_eq!(e.normalize().unwrap().to_string(), "3*x/2");

        let e = Expr::Add(vec![Expr::Mul(vec![frac(-1, 2), x()]), frac(-3, 4)]);
        assert_eq!(e.normalize().unwrap().to_string(), "-x/2 - 3/4");
    }

    #[test]
    fn test_power_of_product() {
        // (2*x)**2 = 4*x**2
        let e = Expr::Pow(Box::new(Expr::Mul(vec![Expr::int(2), x()])), 2);
        assert_eq!(e.normalize().unwrap().to_string(), "4*x**2");
    }

    #[test]
    fn test_overflow() {
        let e = Expr::Pow(Box::new(Expr::int(10)), 30);
        assert_eq!(e.normalize(), Err(AlgebraError::Overflow));
    }

    #[test]
    fn test_smallest_integer_is_overflow() {
        // x - 9223372036854775807 - 1
        let e = Expr::Add(vec![x(), Expr::int(-i64::MAX), Expr::int(-1)]);
        assert_eq!(e.normalize(), Err(AlgebraError::Overflow));

        // x**2 - 9223372036854775807*x - x
        let e = Expr::Add(vec![
            Expr::Pow(Box::new(x()), 2),
            Expr::Mul(vec![Expr::int(-i64::MAX), x()]),
            -x(),
        ]);
        assert_eq!(e.normalize(), Err(AlgebraError::Overflow));

        let e = Expr::Mul(vec![Expr::int(i64::MAX), Expr::int(-1), Expr::int(2)]);
        assert_eq!(e.normalize(), Err(AlgebraError::Overflow));
    }

    #[test]
    fn test_render_smallest_integer() {
        let e = Expr::Add(vec![x(), Expr::int(i64::MIN)]);
        assert_eq!(e.to_string(), "x + -9223372036854775808");

        let e = Expr::Add(vec![x(), Expr::Mul(vec![Expr::int(i64::MIN), x()])]);
        assert_eq!(e.to_string(), "x + -9223372036854775808*x");
    }

    #[test]
    fn test_degree_limit() {
        let e = Expr::Pow(Box::new(x()), 65);
        assert_eq!(e.normalize(), Err(AlgebraError::DegreeTooLarge(65)));
    }

    #[test]
    fn test_complexity() {
        assert_eq!(x().complexity(), 1);
        assert_eq!(Expr::Mul(vec![Expr::int(3), x()]).complexity(), 3);
        assert_eq!(Expr::Pow(Box::new(x()), 2).complexity(), 3);
    }
}
