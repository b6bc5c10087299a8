//! Core functionalities.
mod agent;
mod env;
mod policy;
mod replay_buffer;
mod step;
pub use agent::Agent;
use anyhow::Result;
pub use env::Env;
pub use policy::Policy;
pub use replay_buffer::{ExperienceBufferBase, ReplayBufferBase};
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Observations are fixed-length feature vectors. [`Obs::len()`] returns the
/// number of features, which agents compare against the input dimension of
/// their models.
pub trait Obs: Clone + Debug {
    /// Returns the number of features in the observation.
    fn len(&self) -> usize;

    /// Returns `true` if the observation has no features.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An action of an environment.
pub trait Act: Clone + Debug {}

/// An action taken from a finite set and addressed by its index.
///
/// Value-based agents score every action and pick one by index; this trait
/// converts between the index and the environment's action type.
pub trait DiscreteAct: Act {
    /// The number of actions in the set.
    const N_ACTIONS: usize;

    /// Returns the action with the given index.
    ///
    /// Fails with [`CoreError::ActionOutOfRange`](crate::CoreError::ActionOutOfRange)
    /// if `ix >= N_ACTIONS`.
    fn from_index(ix: usize) -> Result<Self>;

    /// Returns the index of the action.
    fn index(&self) -> usize;
}
