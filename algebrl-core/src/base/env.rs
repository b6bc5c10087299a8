//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// Represents an environment whose episodes start from a textual problem.
///
/// An episode is started with [`Env::reset`], which takes the problem
/// statement, and advanced with [`Env::step`] until the returned [`Step`]
/// reports that the episode is done.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Starts a new episode from the given problem statement.
    ///
    /// Fails if the problem cannot be turned into an initial state. The caller
    /// decides whether to abort or to skip the problem.
    fn reset(&mut self, problem: &str) -> Result<Self::Obs>;

    /// Performs an environment step.
    ///
    /// Fails only if the environment is not in an episode; the outcome of the
    /// action itself, good or bad, is reported through the reward.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Returns the observation of the current state.
    fn encode_state(&self) -> Result<Self::Obs>;
}
