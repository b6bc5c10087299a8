//! Action of [`EquationEnv`](crate::EquationEnv).
use algebrl_core::{Act, CoreError, DiscreteAct};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five operations on the current equation, in index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum EquationAct {
    /// Distribute products and powers over sums.
    Expand,

    /// Rewrite both sides into their least complex form.
    Simplify,

    /// Subtract the constant part of the left side from both sides.
    MoveConstant,

    /// Subtract the variable part of the left side from both sides.
    MoveVariable,

    /// Query whether the equation has a unique solution.
    Solve,
}

impl EquationAct {
    /// All actions in index order.
    pub const ALL: [EquationAct; 5] = [
        Self::Expand,
        Self::Simplify,
        Self::MoveConstant,
        Self::MoveVariable,
        Self::Solve,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Expand => "expand",
            Self::Simplify => "simplify",
            Self::MoveConstant => "move_constant",
            Self::MoveVariable => "move_variable",
            Self::Solve => "solve",
        }
    }
}

impl fmt::Display for EquationAct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Act for EquationAct {}

impl DiscreteAct for EquationAct {
    const N_ACTIONS: usize = 5;

    fn from_index(ix: usize) -> anyhow::Result<Self> {
        Self::ALL
            .get(ix)
            .copied()
            .ok_or_else(|| {
                CoreError::ActionOutOfRange {
                    index: ix,
                    n_actions: Self::N_ACTIONS,
                }
                .into()
            })
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_order() {
        for (ix, act) in EquationAct::ALL.iter().enumerate() {
            assert_eq!(act.index(), ix);
            assert_eq!(EquationAct::from_index(ix).unwrap(), *act);
        }
        assert_eq!(EquationAct::from_index(4).unwrap(), EquationAct::Solve);
    }

    #[test]
    fn test_unknown_index() {
        let err = EquationAct::from_index(5).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CoreError>(),
            Some(&CoreError::ActionOutOfRange {
                index: 5,
                n_actions: 5
            })
        );
    }
}
