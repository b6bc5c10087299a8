//! Summaries of a training run.
use algebrl_core::{ProblemOutcome, TrainingReport};
use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::{fs::File, path::Path};

/// The rewrite strategy the reward shaping is designed to teach.
pub const STRATEGY_SUMMARY: &str = "\
1. Expand brackets
2. Combine like terms
3. Move variable terms to one side
4. Move constants to the other side
5. Divide by the coefficient
6. Verify the result";

#[derive(Debug, Serialize, PartialEq)]
struct OutcomeRow<'a> {
    problem: &'a str,
    skipped: bool,
    steps: usize,
    final_reward: Option<f32>,
    total_reward: Option<f32>,
    solved: bool,
    error: Option<&'a str>,
}

impl<'a> From<&'a ProblemOutcome> for OutcomeRow<'a> {
    fn from(outcome: &'a ProblemOutcome) -> Self {
        match outcome {
            ProblemOutcome::Completed { problem, outcome } => Self {
                problem: problem.as_str(),
                skipped: false,
                steps: outcome.steps,
                final_reward: outcome.final_reward,
                total_reward: Some(outcome.total_reward),
                solved: outcome.is_terminated,
                error: None,
            },
            ProblemOutcome::Skipped { problem, error } => Self {
                problem: problem.as_str(),
                skipped: true,
                steps: 0,
                final_reward: None,
                total_reward: None,
                solved: false,
                error: Some(error.as_str()),
            },
        }
    }
}

/// Writes one row per problem of `report` to a CSV file.
pub fn write_outcomes(report: &TrainingReport, path: impl AsRef<Path>) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(File::create(path)?);
    for outcome in report.outcomes() {
        wtr.serialize(OutcomeRow::from(outcome))?;
    }
    wtr.flush()?;
    Ok(())
}
