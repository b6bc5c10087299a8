//! Exploration strategy of DQN.
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Index of the largest value; the first one wins on ties.
///
/// Returns 0 for an empty slice.
pub fn argmax(xs: &[f32]) -> usize {
    let mut best = 0;
    for (i, x) in xs.iter().enumerate() {
        if *x > xs[best] {
            best = i;
        }
    }
    best
}

/// Epsilon-greedy explorer for DQN.
///
/// ε is multiplied by `decay` after every learning update, never going
/// below `eps_min`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    pub eps: f64,
    pub eps_min: f64,
    pub decay: f64,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self {
            eps: 1.0,
            eps_min: 0.01,
            decay: 0.995,
        }
    }
}

impl EpsilonGreedy {
    /// Sets the initial value of ε.
    pub fn eps_start(mut self, v: f64) -> Self {
        self.eps = v;
        self
    }

    /// Sets the floor of ε.
    pub fn eps_min(mut self, v: f64) -> Self {
        self.eps_min = v;
        self
    }

    /// Sets the multiplicative decay of ε.
    pub fn decay(mut self, v: f64) -> Self {
        self.decay = v;
        self
    }

    /// The current value of ε.
    pub fn epsilon(&self) -> f64 {
        self.eps
    }

    /// Decays ε once.
    pub fn step(&mut self) {
        if self.eps > self.eps_min {
            self.eps = (self.eps * self.decay).max(self.eps_min);
        }
    }

    /// Takes an action based on action values.
    ///
    /// With probability ε, picks an action uniformly at random; otherwise the
    /// action with the largest value.
    pub fn action(&self, values: &[f32], rng: &mut impl Rng) -> usize {
        if rng.gen::<f64>() < self.epsilon() {
            rng.gen_range(0..values.len())
        } else {
            argmax(values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_argmax_first_wins() {
        assert_eq!(argmax(&[0.1, 0.5, 0.5, -1.0]), 1);
        assert_eq!(argmax(&[2.0, 2.0]), 0);
        assert_eq!(argmax(&[-3.0, -2.0, -2.5]), 1);
    }

    #[test]
    fn test_decay_is_floored() {
        let mut explorer = EpsilonGreedy::default().decay(0.5).eps_min(0.1);
        let mut last = explorer.epsilon();
        assert_eq!(last, 1.0);
        for _ in 0..10 {
            explorer.step();
            assert!(explorer.epsilon() <= last);
            assert!(explorer.epsilon() >= 0.1);
            last = explorer.epsilon();
        }
        assert_eq!(explorer.epsilon(), 0.1);
    }

    #[test]
    fn test_greedy_and_random() {
        let mut rng = SmallRng::seed_from_u64(42);
        let values = [0.0, 1.0, 3.0, 2.0, 0.5];

        let greedy = EpsilonGreedy::default().eps_start(0.0).eps_min(0.0);
        assert!((0..20).all(|_| greedy.action(&values, &mut rng) == 2));

        let random = EpsilonGreedy::default();
        let picks = (0..200)
            .map(|_| random.action(&values, &mut rng))
            .collect::<Vec<_>>();
        assert!(picks.iter().all(|&a| a < values.len()));
        assert!(picks.iter().any(|&a| a != 2));
    }
}
