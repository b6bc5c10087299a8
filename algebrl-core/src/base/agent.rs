//! Agent.
use super::{Env, Policy};
use crate::{record::Record, Transition};
use anyhow::Result;

/// Represents a trainable policy on an environment.
///
/// The agent owns its experience. Transitions are handed over with
/// [`Agent::remember`] and consumed by [`Agent::replay`], which performs a
/// learning update on the agent's model parameters.
pub trait Agent<E: Env>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Stores a transition in the agent's experience buffer.
    fn remember(&mut self, transition: Transition<E::Obs, E::Act>) -> Result<()>;

    /// Performs a learning update from stored transitions.
    ///
    /// Returns `Ok(None)` without touching any state if there is not enough
    /// experience yet; otherwise returns some information on the update.
    fn replay(&mut self) -> Result<Option<Record>>;
}
