#![warn(missing_docs)]
//! Core abstractions for learning algebraic rewrite strategies.
//!
//! The crate defines the interfaces shared by environments and agents
//! ([`Env`], [`Policy`], [`Agent`]), the experience replay buffer owned by an
//! agent ([`FifoReplayBuffer`]), records for logging training metrics
//! ([`record`]), and the training driver that runs episodes over a batch of
//! problems ([`Trainer`]).
pub mod error;
pub mod record;
pub mod replay_buffer;

mod base;
pub use base::{
    Act, Agent, DiscreteAct, Env, ExperienceBufferBase, Info, Obs, Policy, ReplayBufferBase, Step,
};
pub use error::CoreError;
pub use replay_buffer::{FifoReplayBuffer, FifoReplayBufferConfig, Transition};

mod trainer;
pub use trainer::{EpisodeOutcome, ProblemOutcome, Trainer, TrainerConfig, TrainingReport};
