//! Errors of [`EquationEnv`](crate::EquationEnv).
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("step called before a successful reset")]
    NotReset,
}
