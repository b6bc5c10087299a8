//! FIFO replay buffer.
use super::{FifoReplayBufferConfig, Transition};
use crate::{ExperienceBufferBase, ReplayBufferBase};
use anyhow::{bail, Result};
use rand::{rngs::StdRng, seq::index, SeedableRng};
use std::collections::VecDeque;

/// A bounded replay buffer with first-in-first-out eviction.
///
/// Once the number of stored transitions exceeds the capacity, the oldest
/// transition is dropped. Batches are drawn uniformly without replacement and
/// leave the stored transitions untouched.
pub struct FifoReplayBuffer<O, A> {
    capacity: usize,
    data: VecDeque<Transition<O, A>>,
    rng: StdRng,
}

impl<O, A> FifoReplayBuffer<O, A> {
    /// Returns the capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns an iterator over stored transitions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transition<O, A>> {
        self.data.iter()
    }
}

impl<O, A> ExperienceBufferBase for FifoReplayBuffer<O, A> {
    type Item = Transition<O, A>;

    fn push(&mut self, tr: Self::Item) -> Result<()> {
        self.data.push_back(tr);
        while self.data.len() > self.capacity {
            self.data.pop_front();
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

impl<O: Clone, A: Clone> ReplayBufferBase for FifoReplayBuffer<O, A> {
    type Config = FifoReplayBufferConfig;
    type Batch = Vec<Transition<O, A>>;

    fn build(config: &Self::Config) -> Self {
        Self {
            capacity: config.capacity,
            data: VecDeque::with_capacity(config.capacity),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    fn batch(&mut self, size: usize) -> Result<Self::Batch> {
        if size > self.data.len() {
            bail!(
                "Cannot sample {} transitions from a buffer of {}",
                size,
                self.data.len()
            );
        }
        let ixs = index::sample(&mut self.rng, self.data.len(), size);
        Ok(ixs.into_iter().map(|ix| self.data[ix].clone()).collect())
    }
}
