//! Equation rewriting environment.
use crate::{
    rewrite::{rewrite, RewriteOutcome},
    EnvError, EquationAct, EquationEnvConfig, EquationObs,
};
use algebrl_algebra::{parse, solve, AlgebraError, Equation, Rational};
use algebrl_core::{
    record::{Record, RecordValue},
    Env, Info, Step,
};
use anyhow::Result;
use log::{debug, trace};

/// Reward of a step that does not change the equation.
pub const STEP_COST: f32 = -1.0;

/// Reward of a committed rewrite.
pub const APPLIED_REWARD: f32 = 3.0;

/// Reward of a rewrite whose result is not equivalent to the equation.
pub const REJECTED_REWARD: f32 = -5.0;

/// Reward of an operation that failed.
pub const FAILED_REWARD: f32 = -10.0;

/// Reward of solving at step 0; every step taken is subtracted from it.
pub const SOLVE_REWARD: f32 = 20.0;

/// What happened in a step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// A rewrite was committed.
    Applied,

    /// A rewrite was discarded as not equivalent.
    Rejected,

    /// A rewrite or the solve query failed; the equation is unchanged.
    Failed(AlgebraError),

    /// The equation has a unique solution.
    Solved(Rational),

    /// The equation has no unique solution.
    Unsolved,
}

/// Information attached to each [`Step`] of [`EquationEnv`].
#[derive(Clone, Debug, PartialEq)]
pub struct EquationInfo {
    /// What happened in the step.
    pub outcome: StepOutcome,

    /// Rendering of the equation after the step.
    pub equation: String,
}

impl EquationInfo {
    /// The solution found by the step, if any.
    pub fn solution(&self) -> Option<Rational> {
        match self.outcome {
            StepOutcome::Solved(v) => Some(v),
            _ => None,
        }
    }
}

impl Info for EquationInfo {}

struct Episode {
    problem: String,
    equation: Equation,
    steps: usize,
}

impl Episode {
    fn settle(&mut self, outcome: RewriteOutcome) -> (f32, StepOutcome) {
        match outcome {
            RewriteOutcome::Applied(eq) => {
                self.equation = eq;
                (APPLIED_REWARD, StepOutcome::Applied)
            }
            RewriteOutcome::Rejected(_) => (REJECTED_REWARD, StepOutcome::Rejected),
            RewriteOutcome::Failed(e) => (FAILED_REWARD, StepOutcome::Failed(e)),
        }
    }

    fn query_solution(&self) -> (f32, StepOutcome) {
        match solve(&self.equation) {
            Ok(Some(v)) => (SOLVE_REWARD - self.steps as f32, StepOutcome::Solved(v)),
            Ok(None) => (STEP_COST, StepOutcome::Unsolved),
            Err(e) => (FAILED_REWARD, StepOutcome::Failed(e)),
        }
    }
}

/// Holds one equation and rewrites it with [`EquationAct`]s.
///
/// Rewards of a step:
///
/// | event | reward |
/// |---|---|
/// | rewrite committed | 3 |
/// | rewrite not equivalent | -5 |
/// | rewrite or solve failed | -10 |
/// | solved at step `n` | `20 - n` |
/// | no unique solution | -1 |
///
/// An episode is cut once the step counter reaches
/// [`max_steps`](EquationEnvConfig::max_steps), whatever the last reward.
pub struct EquationEnv {
    config: EquationEnvConfig,
    episode: Option<Episode>,
}

impl EquationEnv {
    /// The problem text of the current episode.
    pub fn problem(&self) -> Option<&str> {
        self.episode.as_ref().map(|e| e.problem.as_str())
    }

    /// The current equation.
    pub fn equation(&self) -> Option<&Equation> {
        self.episode.as_ref().map(|e| &e.equation)
    }

    /// Number of steps taken in the current episode.
    pub fn steps(&self) -> usize {
        self.episode.as_ref().map_or(0, |e| e.steps)
    }

    /// Rendering of the current equation.
    pub fn current_equation_text(&self) -> Result<String> {
        Ok(self.episode()?.equation.to_string())
    }

    fn episode(&self) -> Result<&Episode> {
        Ok(self.episode.as_ref().ok_or(EnvError::NotReset)?)
    }

    fn step_with(
        &mut self,
        act: EquationAct,
        rewrite: impl FnOnce(&Equation) -> RewriteOutcome,
    ) -> Result<(Step<Self>, Record)> {
        let max_steps = self.config.max_steps;
        let episode = self.episode.as_mut().ok_or(EnvError::NotReset)?;
        episode.steps += 1;

        let (reward, outcome) = match act {
            EquationAct::Solve => episode.query_solution(),
            _ => episode.settle(rewrite(&episode.equation)),
        };
        let steps = episode.steps;
        let text = episode.equation.to_string();
        let is_terminated = matches!(outcome, StepOutcome::Solved(_));
        let is_truncated = steps >= max_steps;
        trace!("Step {} | {} | {:?} | {} | {}", steps, act, outcome, reward, text);

        let obs = EquationObs::encode(&text, self.config.obs_dim);
        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(reward)),
            ("step", RecordValue::Scalar(steps as f32)),
            ("action", RecordValue::String(act.name().to_string())),
            ("equation", RecordValue::String(text.clone())),
        ]);
        let info = EquationInfo {
            outcome,
            equation: text,
        };

        Ok((
            Step::new(obs, act, reward, is_terminated, is_truncated, info),
            record,
        ))
    }
}

impl Env for EquationEnv {
    type Config = EquationEnvConfig;
    type Obs = EquationObs;
    type Act = EquationAct;
    type Info = EquationInfo;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            episode: None,
        })
    }

    /// Parses `problem` and starts an episode on it.
    ///
    /// A parse failure is returned as [`AlgebraError`] and leaves the environment
    /// without an episode.
    fn reset(&mut self, problem: &str) -> Result<EquationObs> {
        self.episode = None;
        let equation = parse(problem)?;
        debug!("Reset with {:?} parsed as {}", problem, equation);
        self.episode = Some(Episode {
            problem: problem.to_string(),
            equation,
            steps: 0,
        });
        self.encode_state()
    }

    fn step(&mut self, act: &EquationAct) -> Result<(Step<Self>, Record)> {
        let act = *act;
        self.step_with(act, |eq| rewrite(eq, act))
    }

    fn encode_state(&self) -> Result<EquationObs> {
        let text = self.episode()?.equation.to_string();
        Ok(EquationObs::encode(&text, self.config.obs_dim))
    }
}
