use crate::{Env, Step};

/// A transition `(o_t, a_t, r_t, o_t+1, done_t)`.
///
/// Transitions are created by the training driver and then owned by the
/// agent's experience buffer. They are never modified after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<O, A> {
    /// Observation before the action.
    pub obs: O,

    /// Action taken.
    pub act: A,

    /// Reward for the action.
    pub reward: f32,

    /// Observation after the action.
    pub next_obs: O,

    /// Whether the episode ended with this transition.
    pub is_done: bool,
}

impl<O, A> Transition<O, A> {
    /// Constructs a transition.
    pub fn new(obs: O, act: A, reward: f32, next_obs: O, is_done: bool) -> Self {
        Self {
            obs,
            act,
            reward,
            next_obs,
            is_done,
        }
    }

    /// Constructs a transition from the observation the action was taken on
    /// and the resulting [`Step`].
    pub fn from_step<E>(obs: O, step: &Step<E>) -> Self
    where
        E: Env<Obs = O, Act = A>,
        O: Clone,
        A: Clone,
    {
        Self {
            obs,
            act: step.act.clone(),
            reward: step.reward,
            next_obs: step.obs.clone(),
            is_done: step.is_done(),
        }
    }
}
