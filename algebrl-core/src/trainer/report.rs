//! Results of a training run.
use std::fmt;

/// The result of running one episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeOutcome {
    /// Number of environment steps taken.
    pub steps: usize,

    /// Reward of the last step, `None` if no step was taken.
    pub final_reward: Option<f32>,

    /// Sum of rewards over the episode.
    pub total_reward: f32,

    /// Whether the episode reached its goal.
    pub is_terminated: bool,

    /// Whether the episode ended, by reaching its goal or the environment's
    /// step limit.
    pub is_done: bool,
}

/// What happened with one problem of a batch.
#[derive(Clone, Debug, PartialEq)]
pub enum ProblemOutcome {
    /// An episode was run on the problem.
    Completed {
        /// The problem statement.
        problem: String,
        /// The episode result.
        outcome: EpisodeOutcome,
    },

    /// The problem could not start an episode and was skipped.
    Skipped {
        /// The problem statement.
        problem: String,
        /// Description of the error.
        error: String,
    },
}

/// Summary of a training run over a batch of problems.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainingReport {
    outcomes: Vec<ProblemOutcome>,
}

impl TrainingReport {
    pub(crate) fn push(&mut self, outcome: ProblemOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns the outcomes in the order the problems were given.
    pub fn outcomes(&self) -> &[ProblemOutcome] {
        &self.outcomes
    }

    /// Returns the number of episodes run.
    pub fn n_episodes(&self) -> usize {
        self.episodes().count()
    }

    /// Returns the number of skipped problems.
    pub fn n_skipped(&self) -> usize {
        self.outcomes.len() - self.n_episodes()
    }

    /// Returns the number of episodes that reached their goal.
    pub fn n_solved(&self) -> usize {
        self.episodes().filter(|o| o.is_terminated).count()
    }

    /// Returns the final rewards of the episodes that took at least one step.
    pub fn final_rewards(&self) -> Vec<f32> {
        self.episodes().filter_map(|o| o.final_reward).collect()
    }

    /// Returns the average final reward, `0.0` if there is none.
    pub fn average_final_reward(&self) -> f32 {
        let rs = self.final_rewards();
        if rs.is_empty() {
            0.0
        } else {
            rs.iter().sum::<f32>() / rs.len() as f32
        }
    }

    fn episodes(&self) -> impl Iterator<Item = &EpisodeOutcome> {
        self.outcomes.iter().filter_map(|o| match o {
            ProblemOutcome::Completed { outcome, .. } => Some(outcome),
            ProblemOutcome::Skipped { .. } => None,
        })
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Episodes: {}", self.n_episodes())?;
        writeln!(f, "Solved: {}", self.n_solved())?;
        writeln!(f, "Skipped problems: {}", self.n_skipped())?;
        write!(
            f,
            "Average reward over {} problems: {:.2}",
            self.n_episodes(),
            self.average_final_reward()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(final_reward: Option<f32>, is_terminated: bool) -> ProblemOutcome {
        ProblemOutcome::Completed {
            problem: "x = 1".to_string(),
            outcome: EpisodeOutcome {
                steps: 2,
                final_reward,
                total_reward: final_reward.unwrap_or(0.0),
                is_terminated,
                is_done: true,
            },
        }
    }

    #[test]
    fn test_average_skips_empty_episodes() {
        let mut report = TrainingReport::default();
        report.push(completed(Some(18.0), true));
        report.push(completed(Some(-10.0), false));
        report.push(completed(None, false));
        report.push(ProblemOutcome::Skipped {
            problem: "3x + 5".to_string(),
            error: "missing '='".to_string(),
        });

        assert_eq!(report.n_episodes(), 3);
        assert_eq!(report.n_skipped(), 1);
        assert_eq!(report.n_solved(), 1);
        assert_eq!(report.average_final_reward(), 4.0);
    }

    #[test]
    fn test_empty_report() {
        let report = TrainingReport::default();
        assert_eq!(report.average_final_reward(), 0.0);
        assert!(report.to_string().ends_with("Average reward over 0 problems: 0.00"));
    }
}
