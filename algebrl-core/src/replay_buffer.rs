//! FIFO replay buffer of transitions.
mod base;
mod config;
mod transition;
pub use base::FifoReplayBuffer;
pub use config::FifoReplayBufferConfig;
pub use transition::Transition;
