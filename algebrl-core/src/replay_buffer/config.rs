//! Configuration of [`FifoReplayBuffer`](super::FifoReplayBuffer).
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Configuration of [`FifoReplayBuffer`](super::FifoReplayBuffer).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FifoReplayBufferConfig {
    pub(super) capacity: usize,
    pub(super) seed: u64,
}

impl Default for FifoReplayBufferConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            seed: 42,
        }
    }
}

impl FifoReplayBufferConfig {
    /// Sets the capacity of the replay buffer.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the random seed for sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
