//! Operations on equations.
//!
//! All operations are pure and report failures as [`AlgebraError`].
use crate::{
    error::{AlgebraError, ParseError, Result},
    expr::{in_range, Expr},
    parser::parse_expr,
    poly::Poly,
    text::clean_text,
    Equation, Rational,
};
use log::trace;
use num_traits::{CheckedDiv, CheckedSub, Zero};

/// Variable of an equation without symbols.
pub const DEFAULT_VAR: &str = "x";

/// Parses an equation `lhs = rhs`.
///
/// Implicit products (`3(x - 2)`, `2x`), `^` and `**` powers, decimal literals and
/// division by non-zero constants are accepted. Both sides must use the same single
/// symbol; an equation without symbols is in [`DEFAULT_VAR`].
pub fn parse(text: &str) -> Result<Equation> {
    let cleaned = clean_text(text);
    let sides = cleaned.split('=').collect::<Vec<_>>();
    let (lhs, rhs) = match sides.as_slice() {
        [_] => return Err(ParseError::MissingSeparator(text.to_string()).into()),
        [lhs, rhs] => (lhs.trim(), rhs.trim()),
        _ => return Err(ParseError::MultipleSeparators(text.to_string()).into()),
    };
    if lhs.is_empty() {
        return Err(ParseError::EmptySide("left").into());
    }
    if rhs.is_empty() {
        return Err(ParseError::EmptySide("right").into());
    }

    let lhs = parse_expr(lhs)?;
    let rhs = parse_expr(rhs)?;

    let mut symbols = lhs.symbols();
    symbols.extend(rhs.symbols());
    let var = match symbols.into_iter().collect::<Vec<_>>().as_slice() {
        [] => DEFAULT_VAR.to_string(),
        [var] => var.to_string(),
        [a, b, ..] => {
            return Err(ParseError::MultipleVariables(a.to_string(), b.to_string()).into())
        }
    };

    Ok(Equation::new(lhs, rhs, var))
}

/// Distributes products and powers over sums on both sides.
pub fn expand(eq: &Equation) -> Result<Equation> {
    eq.map_sides(|side| Ok(Poly::from_expr(side)?.to_expr(eq.var())))
}

/// The least complex of the expanded, normalized and content-factored forms.
fn simplest(side: &Expr, var: &str) -> Result<Expr> {
    let poly = Poly::from_expr(side)?;
    let (content, primitive) = poly.primitive()?;

    let mut best = poly.to_expr(var);
    let candidates = [
        side.normalize()?,
        Expr::Mul(vec![Expr::Num(content), primitive.to_expr(var)]).normalize()?,
    ];
    for candidate in candidates {
        if candidate.complexity() < best.complexity() {
            best = candidate;
        }
    }
    Ok(best)
}

/// Rewrites each side into its least complex known form.
///
/// Complexity is the number of nodes of the tree; ties go to the expanded form.
pub fn simplify(eq: &Equation) -> Result<Equation> {
    eq.map_sides(|side| simplest(side, eq.var()))
}

fn lhs_terms(eq: &Equation) -> Vec<&Expr> {
    match eq.lhs() {
        Expr::Add(ts) => ts.iter().collect(),
        e => vec![e],
    }
}

fn sum(mut terms: Vec<Expr>) -> Expr {
    match terms.len() {
        0 => Expr::zero(),
        1 => terms.remove(0),
        _ => Expr::Add(terms),
    }
}

/// The additive part of the left side that does not depend on the variable.
pub fn isolate_constant(eq: &Equation) -> Expr {
    sum(lhs_terms(eq)
        .into_iter()
        .filter(|t| !t.contains_symbol())
        .cloned()
        .collect())
}

/// The additive part of the left side that depends on the variable.
pub fn isolate_variable_part(eq: &Equation) -> Expr {
    sum(lhs_terms(eq)
        .into_iter()
        .filter(|t| t.contains_symbol())
        .cloned()
        .collect())
}

/// Subtracts `term` from both sides.
pub fn subtract_term(eq: &Equation, term: &Expr) -> Result<Equation> {
    eq.map_sides(|side| (side.clone() - term.clone()).normalize())
}

/// Whether `lhs - rhs` is the same polynomial for both equations.
pub fn equivalent(a: &Equation, b: &Equation) -> Result<bool> {
    Ok(a.residual()? == b.residual()?)
}

/// Solves a linear equation.
///
/// Returns `None` when the variable cancels out, for identities and
/// contradictions alike. Equations of degree two or more fail with
/// [`AlgebraError::Nonlinear`].
pub fn solve(eq: &Equation) -> Result<Option<Rational>> {
    let residual = eq.residual()?;
    trace!("Residual of {}: {:?}", eq, residual.coeffs());
    match residual.degree() {
        None | Some(0) => Ok(None),
        Some(1) => {
            let root = in_range(
                Rational::zero()
                    .checked_sub(&residual.coeff(0))
                    .and_then(|c| c.checked_div(&residual.coeff(1))),
            )?;
            Ok(Some(root))
        }
        Some(d) => Err(AlgebraError::Nonlinear(d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64) -> Rational {
        Rational::from_integer(n)
    }

    #[test]
    fn test_parse_separators() {
        assert_eq!(
            parse("3x + 5"),
            Err(AlgebraError::Parse(ParseError::MissingSeparator(
                "3x + 5".to_string()
            )))
        );
        assert!(matches!(
            parse("x = 1 = 2"),
            Err(AlgebraError::Parse(ParseError::MultipleSeparators(_)))
        ));
        assert_eq!(
            parse(" = 4"),
            Err(AlgebraError::Parse(ParseError::EmptySide("left")))
        );
    }

    #[test]
    fn test_parse_variables() {
        assert_eq!(parse("2y + 1 = 7").unwrap().var(), "y");
        assert_eq!(parse("2 + 2 = 4").unwrap().var(), "x");
        assert_eq!(
            parse("x + y = 2"),
            Err(AlgebraError::Parse(ParseError::MultipleVariables(
                "x".to_string(),
                "y".to_string()
            )))
        );
    }

    #[test]
    fn test_parse_unicode() {
        let eq = parse("5x\u{202f}\u{2212}\u{2009}3 = 12").unwrap();
        assert_eq!(eq.to_string(), "5*x - 3 = 12");
    }

    #[test]
    fn test_rendering_reparses() {
        for text in [
            "3(x - 2) + 5 = 2x + 11",
            "x/2 - 3/4 = -x + 1",
            "(x + 1)^2 = x^2 + 5",
            "0.25x + 2 = 1.5",
        ] {
            let eq = parse(text).unwrap();
            let again = parse(&eq.to_string()).unwrap();
            assert_eq!(again, eq, "{}", text);
            assert!(equivalent(&eq, &again).unwrap());
        }
    }

    #[test]
    fn test_expand() {
        let eq = parse("3(x - 2) + 5 = 2x + 11").unwrap();
        assert_eq!(eq.to_string(), "3*(x - 2) + 5 = 2*x + 11");

        let expanded = expand(&eq).unwrap();
        assert_eq!(expanded.to_string(), "3*x - 1 = 2*x + 11");
        assert!(equivalent(&expanded, &parse("3x - 1 = 2x + 11").unwrap()).unwrap());
        assert_eq!(solve(&expanded).unwrap(), Some(r(12)));
    }

    #[test]
    fn test_simplify() {
        let eq = parse("2(x + 1) + x = (x + 1)^2 - x^2").unwrap();
        let simplified = simplify(&eq).unwrap();
        assert_eq!(simplified.to_string(), "3*x + 2 = 2*x + 1");
        assert!(equivalent(&eq, &simplified).unwrap());
    }

    #[test]
    fn test_isolate() {
        let eq = parse("3(x - 2) + 5 = 2x + 11").unwrap();
        assert_eq!(isolate_constant(&eq), Expr::int(5));
        assert_eq!(isolate_variable_part(&eq).to_string(), "3*(x - 2)");

        let eq = parse("4x = 8").unwrap();
        assert_eq!(isolate_constant(&eq), Expr::zero());
        assert_eq!(isolate_variable_part(&eq).to_string(), "4*x");

        let eq = parse("7 = x").unwrap();
        assert_eq!(isolate_constant(&eq), Expr::int(7));
        assert_eq!(isolate_variable_part(&eq), Expr::zero());
    }

    #[test]
    fn test_subtract_term() {
        let eq = parse("3x - 1 = 2x + 11").unwrap();
        let moved = subtract_term(&eq, &isolate_constant(&eq)).unwrap();
        assert_eq!(moved.to_string(), "3*x = 2*x + 12");

        let moved = subtract_term(&moved, &isolate_variable_part(&moved)).unwrap();
        assert_eq!(moved.to_string(), "0 = -x + 12");
        assert!(equivalent(&eq, &moved).unwrap());
    }

    #[test]
    fn test_equivalent_is_reflexive() {
        for text in ["x = 1", "3(x - 2) + 5 = 2x + 11", "x^2 = 4", "1 = 1"] {
            let eq = parse(text).unwrap();
            assert!(equivalent(&eq, &eq).unwrap());
        }
    }

    #[test]
    fn test_equivalence_is_not_scaling() {
        let a = parse("2x = 4").unwrap();
        let b = parse("x = 2").unwrap();
        assert!(!equivalent(&a, &b).unwrap());
    }

    #[test]
    fn test_smallest_integer_fails_to_parse() {
        for text in [
            "x - 9223372036854775807 - 1 = 0",
            "x^2 - 9223372036854775807x - x = 0",
            "x^2 + (-9223372036854775807 - 1)(x) = 0",
        ] {
            assert_eq!(parse(text), Err(AlgebraError::Overflow), "{}", text);
        }
    }

    #[test]
    fn test_solve() {
        assert_eq!(solve(&parse("2x + 1 = 4").unwrap()).unwrap(), Some(Rational::new(3, 2)));
        assert_eq!(solve(&parse("x + 1 = x + 1").unwrap()).unwrap(), None);
        assert_eq!(solve(&parse("x + 1 = x + 2").unwrap()).unwrap(), None);
        assert_eq!(
            solve(&parse("x^2 = 4").unwrap()),
            Err(AlgebraError::Nonlinear(2))
        );
    }
}
