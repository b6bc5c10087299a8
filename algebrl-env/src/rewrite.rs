//! Rewrites of the current equation.
use crate::EquationAct;
use algebrl_algebra::{
    equivalent, expand, isolate_constant, isolate_variable_part, simplify, subtract_term,
    AlgebraError, Equation,
};

/// The result of applying a rewrite action to an equation.
#[derive(Clone, Debug, PartialEq)]
pub enum RewriteOutcome {
    /// The candidate is equivalent to the old equation and replaces it.
    Applied(Equation),

    /// The candidate is not equivalent to the old equation and is discarded.
    Rejected(Equation),

    /// The rewrite or the equivalence check failed.
    Failed(AlgebraError),
}

/// Checks a candidate produced from `old`.
pub(crate) fn classify(old: &Equation, candidate: Result<Equation, AlgebraError>) -> RewriteOutcome {
    let candidate = match candidate {
        Ok(eq) => eq,
        Err(e) => return RewriteOutcome::Failed(e),
    };
    match equivalent(old, &candidate) {
        Ok(true) => RewriteOutcome::Applied(candidate),
        Ok(false) => RewriteOutcome::Rejected(candidate),
        Err(e) => RewriteOutcome::Failed(e),
    }
}

/// Applies a rewrite action. [`EquationAct::Solve`] leaves the equation as it is.
pub fn rewrite(eq: &Equation, act: EquationAct) -> RewriteOutcome {
    let candidate = match act {
        EquationAct::Expand => expand(eq),
        EquationAct::Simplify => simplify(eq),
        EquationAct::MoveConstant => subtract_term(eq, &isolate_constant(eq)),
        EquationAct::MoveVariable => subtract_term(eq, &isolate_variable_part(eq)),
        EquationAct::Solve => Ok(eq.clone()),
    };
    classify(eq, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use algebrl_algebra::parse;

    #[test]
    fn test_move_constant() {
        let eq = parse("3x - 1 = 2x + 11").unwrap();
        match rewrite(&eq, EquationAct::MoveConstant) {
            RewriteOutcome::Applied(eq) => assert_eq!(eq.to_string(), "3*x = 2*x + 12"),
            outcome => panic!("unexpected outcome {:?}", outcome),
        }
    }

    #[test]
    fn test_non_equivalent_candidate_is_rejected() {
        let eq = parse("2x = 4").unwrap();
        let halved = parse("x = 2").unwrap();
        assert_eq!(
            classify(&eq, Ok(halved.clone())),
            RewriteOutcome::Rejected(halved)
        );
    }

    #[test]
    fn test_failed_rewrite() {
        let eq = parse("x^40 = 1").unwrap();
        let outcome = classify(&eq, Err(AlgebraError::Overflow));
        assert_eq!(outcome, RewriteOutcome::Failed(AlgebraError::Overflow));
    }
}
