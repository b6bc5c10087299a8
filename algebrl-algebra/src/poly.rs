//! Dense univariate polynomials with rational coefficients.
use crate::{
    error::{AlgebraError, Result},
    expr::{checked_pow, in_range, Expr},
    Rational,
};
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, Signed, Zero};

/// The largest supported polynomial degree.
pub const MAX_DEGREE: usize = 64;

/// A polynomial in one variable, `coeffs[d]` being the coefficient of degree `d`.
///
/// Trailing zero coefficients are never stored, so two polynomials are equal
/// exactly when they are the same function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Poly {
    coeffs: Vec<Rational>,
}

impl Poly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A constant polynomial.
    pub fn constant(c: Rational) -> Self {
        Self::from_coeffs(vec![c])
    }

    /// The variable itself.
    pub fn var() -> Self {
        Self::from_coeffs(vec![Rational::zero(), Rational::one()])
    }

    /// Builds a polynomial from coefficients in increasing degree.
    pub fn from_coeffs(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().is_some_and(Zero::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Coefficients in increasing degree.
    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    /// The degree, `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// The coefficient of degree `d`.
    pub fn coeff(&self, d: usize) -> Rational {
        self.coeffs.get(d).copied().unwrap_or_else(Rational::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    fn zip_with(
        &self,
        other: &Self,
        op: impl Fn(&Rational, &Rational) -> Option<Rational>,
    ) -> Result<Self> {
        let n = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..n)
            .map(|d| in_range(op(&self.coeff(d), &other.coeff(d))))
            .collect::<Result<_>>()?;
        Ok(Self::from_coeffs(coeffs))
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a.checked_add(b))
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a.checked_sub(b))
    }

    /// Product; fails if the degree exceeds [`MAX_DEGREE`].
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        let (Some(da), Some(db)) = (self.degree(), other.degree()) else {
            return Ok(Self::zero());
        };
        if da + db > MAX_DEGREE {
            return Err(AlgebraError::DegreeTooLarge(da + db));
        }

        let mut coeffs = vec![Rational::zero(); da + db + 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                let ab = in_range(a.checked_mul(b))?;
                coeffs[i + j] = in_range(coeffs[i + j].checked_add(&ab))?;
            }
        }
        Ok(Self::from_coeffs(coeffs))
    }

    pub fn checked_pow(&self, e: u32) -> Result<Self> {
        match self.degree() {
            None if e == 0 => Ok(Self::constant(Rational::one())),
            None => Ok(Self::zero()),
            Some(0) => Ok(Self::constant(checked_pow(&self.coeffs[0], e)?)),
            Some(d) => {
                let total = d.saturating_mul(e as usize);
                if total > MAX_DEGREE {
                    return Err(AlgebraError::DegreeTooLarge(total));
                }
                (0..e).try_fold(Self::constant(Rational::one()), |acc, _| {
                    acc.checked_mul(self)
                })
            }
        }
    }

    /// Divides every coefficient by `c`.
    pub fn checked_div_scalar(&self, c: &Rational) -> Result<Self> {
        let coeffs = self
            .coeffs
            .iter()
            .map(|a| in_range(a.checked_div(c)))
            .collect::<Result<_>>()?;
        Ok(Self::from_coeffs(coeffs))
    }

    /// Splits the polynomial into its content and primitive part.
    ///
    /// The primitive part has coprime integer coefficients and a positive
    /// leading coefficient. The zero polynomial gives `(1, 0)`.
    pub fn primitive(&self) -> Result<(Rational, Self)> {
        let Some(lead) = self.coeffs.last() else {
            return Ok((Rational::one(), Self::zero()));
        };

        let mut g = 0u64;
        let mut l = 1u64;
        for c in self.coeffs.iter().filter(|c| !c.is_zero()) {
            g = gcd(g, c.numer().unsigned_abs());
            let d = c.denom().unsigned_abs();
            l = (l / gcd(l, d))
                .checked_mul(d)
                .ok_or(AlgebraError::Overflow)?;
        }
        let g = i64::try_from(g).map_err(|_| AlgebraError::Overflow)?;
        let l = i64::try_from(l).map_err(|_| AlgebraError::Overflow)?;

        let mut content = Rational::new(g, l);
        if lead.is_negative() {
            content = -content;
        }
        Ok((content, self.checked_div_scalar(&content)?))
    }

    /// Builds a polynomial from an expression, reading every symbol as the variable.
    pub fn from_expr(expr: &Expr) -> Result<Self> {
        match expr {
            Expr::Num(c) => Ok(Self::constant(*c)),
            Expr::Sym(_) => Ok(Self::var()),
            Expr::Add(ts) => ts
                .iter()
                .try_fold(Self::zero(), |acc, t| acc.checked_add(&Self::from_expr(t)?)),
            Expr::Mul(fs) => fs
                .iter()
                .try_fold(Self::constant(Rational::one()), |acc, f| {
                    acc.checked_mul(&Self::from_expr(f)?)
                }),
            Expr::Pow(base, e) => Self::from_expr(base)?.checked_pow(*e),
        }
    }

    /// Renders the polynomial as a normalized expression in `var`.
    pub fn to_expr(&self, var: &str) -> Expr {
        let mut terms = self
            .coeffs
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| !c.is_zero())
            .map(|(d, c)| {
                let monomial = match d {
                    0 => return Expr::Num(*c),
                    1 => Expr::sym(var),
                    d => Expr::Pow(Box::new(Expr::sym(var)), d as u32),
                };
                if c.is_one() {
                    monomial
                } else {
                    Expr::Mul(vec![Expr::Num(*c), monomial])
                }
            })
            .collect::<Vec<_>>();

        match terms.len() {
            0 => Expr::zero(),
            1 => terms.remove(0),
            _ => Expr::Add(terms),
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64) -> Rational {
        Rational::from_integer(n)
    }

    #[test]
    fn test_trailing_zeros() {
        let p = Poly::from_coeffs(vec![r(1), r(0), r(0)]);
        assert_eq!(p.degree(), Some(0));
        assert_eq!(Poly::from_coeffs(vec![r(0)]), Poly::zero());
    }

    #[test]
    fn test_square() {
        // (x + 1)**2 = x**2 + 2*x + 1
        let p = Poly::from_coeffs(vec![r(1), r(1)]).checked_pow(2).unwrap();
        assert_eq!(p.coeffs(), &[r(1), r(2), r(1)]);
        assert_eq!(p.to_expr("x").to_string(), "x**2 + 2*x + 1");
    }

    #[test]
    fn test_to_expr_matches_normal_form() {
        let p = Poly::from_coeffs(vec![r(11), r(-1)]);
        let e = p.to_expr("x");
        assert_eq!(e.to_string(), "-x + 11");
        assert_eq!(e.normalize().unwrap(), e);
    }

    #[test]
    fn test_primitive() {
        let p = Poly::from_coeffs(vec![r(-4), r(-6)]);
        let (c, q) = p.primitive().unwrap();
        assert_eq!(c, r(-2));
        assert_eq!(q.coeffs(), &[r(2), r(3)]);

        let p = Poly::from_coeffs(vec![Rational::new(1, 2), Rational::new(3, 4)]);
        let (c, q) = p.primitive().unwrap();
        assert_eq!(c, Rational::new(1, 4));
        assert_eq!(q.coeffs(), &[r(2), r(3)]);
    }

    #[test]
    fn test_degree_limit() {
        let p = Poly::var().checked_pow(40).unwrap();
        assert_eq!(p.checked_mul(&p), Err(AlgebraError::DegreeTooLarge(80)));
    }

    #[test]
    fn test_overflow() {
        let big = Poly::constant(r(i64::MAX));
        assert_eq!(big.checked_add(&big), Err(AlgebraError::Overflow));
    }
}
