//! Environment that rewrites a linear equation towards its solution.
//!
//! [`EquationEnv`] implements [`algebrl_core::Env`]. An episode starts from a
//! problem text such as `"3(x - 2) + 5 = 2x + 11"` and is advanced with one of five
//! [`EquationAct`]s. Observations are fixed-length encodings of the rendered
//! equation ([`EquationObs`]).
//!
//! ```
//! use algebrl_core::Env;
//! use algebrl_env::{EquationAct, EquationEnv, EquationEnvConfig};
//!
//! let mut env = EquationEnv::build(&EquationEnvConfig::default(), 0).unwrap();
//! env.reset("3(x - 2) + 5 = 2x + 11").unwrap();
//! let (step, _) = env.step(&EquationAct::Expand).unwrap();
//! assert_eq!(step.reward, 3.0);
//! let (step, _) = env.step(&EquationAct::Solve).unwrap();
//! assert_eq!(step.reward, 18.0);
//! assert!(step.is_terminated);
//! ```
mod act;
#[cfg(feature = "candle")]
mod candle;
mod config;
mod env;
mod error;
mod obs;
mod rewrite;
pub use act::EquationAct;
pub use config::EquationEnvConfig;
pub use env::{
    EquationEnv, EquationInfo, StepOutcome, APPLIED_REWARD, FAILED_REWARD, REJECTED_REWARD,
    SOLVE_REWARD, STEP_COST,
};
pub use error::EnvError;
pub use obs::EquationObs;
pub use rewrite::{rewrite, RewriteOutcome};
