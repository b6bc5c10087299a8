//! Solving a single problem with a trained agent.
use algebrl_algebra::{expand, normalize_problem_text, parse, simplify, solve, Rational};
use algebrl_core::{record::BufferedRecorder, Agent, Env, Trainer, TrainerConfig};
use algebrl_env::{EquationEnv, EquationEnvConfig};
use anyhow::Result;
use std::fmt;

/// Width of the rule closing a [`SolveReport`].
const RULE_WIDTH: usize = 70;

/// The final answer of a [`SolveReport`].
#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    /// The variable and its value.
    Solved(String, Rational),

    /// The problem parses but has no unique solution.
    Unsolved,

    /// The problem could not be parsed.
    Error(String),
}

/// What the agent did on a problem, and the problem's solution.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveReport {
    pub problem: String,

    /// Rendering of the equation after every step.
    pub trace: Vec<String>,

    /// Reward of the last step.
    pub final_reward: Option<f32>,

    /// Fixed rewriting of the problem, see [`derive`].
    pub derivation: Vec<String>,

    pub answer: Answer,
}

/// Rewrites `problem` without an agent: the parsed equation, its expansion, the
/// simplified expansion and the solution.
///
/// ```text
/// Original: 3*(x - 2) + 5 = 2*x + 11
/// Expanded: 3*x - 1 = 2*x + 11
/// Simplified: 3*x - 1 = 2*x + 11
/// Solution: x = 12
/// ```
pub fn derive(problem: &str) -> algebrl_algebra::Result<(Vec<String>, Answer)> {
    let eq = parse(problem)?;
    let expanded = expand(&eq)?;
    let simplified = simplify(&expanded)?;
    let solution = solve(&simplified)?;

    let mut steps = vec![
        format!("Original: {}", eq),
        format!("Expanded: {}", expanded),
        format!("Simplified: {}", simplified),
    ];
    let answer = match solution {
        Some(v) => {
            steps.push(format!("Solution: {} = {}", simplified.var(), v));
            Answer::Solved(simplified.var().to_string(), v)
        }
        None => {
            steps.push("Solution: none".to_string());
            Answer::Unsolved
        }
    };
    Ok((steps, answer))
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Answer::Error(e) = &self.answer {
            writeln!(f, "{}", self.problem)?;
            writeln!(f, "Error: {}", e)?;
            return write!(f, "{}", "-".repeat(RULE_WIDTH));
        }

        writeln!(f, "Problem: {}", self.problem)?;
        for eq in self.trace.iter() {
            writeln!(f, "{}", eq)?;
        }
        match self.final_reward {
            Some(r) => writeln!(f, "Reward: {}", r)?,
            None => writeln!(f, "Reward: none")?,
        }
        for step in self.derivation.iter() {
            writeln!(f, "{}", step)?;
        }
        match &self.answer {
            Answer::Solved(var, v) => writeln!(f, "Final Solution: {} = {}", var, v)?,
            _ => writeln!(f, "Final Solution: Could not solve")?,
        }
        write!(f, "{}", "-".repeat(RULE_WIDTH))
    }
}

/// Runs one episode of `agent` on `problem`, then solves the problem directly.
///
/// The agent keeps learning from the episode. A problem that cannot be parsed
/// yields a report with [`Answer::Error`]; errors of the agent are returned.
pub fn solve_problem<A>(
    problem: &str,
    agent: &mut A,
    env_config: &EquationEnvConfig,
    budget: usize,
) -> Result<SolveReport>
where
    A: Agent<EquationEnv>,
{
    let problem = normalize_problem_text(problem);
    let mut env = EquationEnv::build(env_config, 0)?;
    let obs = match env.reset(&problem) {
        Ok(obs) => obs,
        Err(e) => {
            return Ok(SolveReport {
                problem,
                trace: vec![],
                final_reward: None,
                derivation: vec![],
                answer: Answer::Error(format!("{:#}", e)),
            })
        }
    };

    let trainer = Trainer::<EquationEnv>::build(
        TrainerConfig::default().max_steps_per_episode(budget),
        env_config.clone(),
    );
    let mut recorder = BufferedRecorder::new();
    let (outcome, _) = trainer.run_episode(&mut env, agent, obs, &mut recorder)?;
    let trace = recorder
        .iter()
        .map(|r| r.get_string("equation"))
        .collect::<Result<Vec<_>, _>>()?;

    let (derivation, answer) = match derive(&problem) {
        Ok(derived) => derived,
        Err(e) => (vec![format!("Error: {}", e)], Answer::Unsolved),
    };

    Ok(SolveReport {
        problem,
        trace,
        final_reward: outcome.final_reward,
        derivation,
        answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use algebrl_algebra::AlgebraError;

    #[test]
    fn test_derive() {
        let (steps, answer) = derive("3(x - 2) + 5 = 2x + 11").unwrap();
        assert_eq!(
            steps,
            [
                "Original: 3*(x - 2) + 5 = 2*x + 11",
                "Expanded: 3*x - 1 = 2*x + 11",
                "Simplified: 3*x - 1 = 2*x + 11",
                "Solution: x = 12",
            ]
        );
        assert_eq!(answer, Answer::Solved("x".to_string(), Rational::from_integer(12)));
        assert_eq!(derive("3(x - 2) + 5 = 2x + 11").unwrap().0, steps);
    }

    #[test]
    fn test_derive_without_solution() {
        let (steps, answer) = derive("2(y + 1) = 2y + 2").unwrap();
        assert_eq!(steps[1], "Expanded: 2*y + 2 = 2*y + 2");
        assert_eq!(steps[3], "Solution: none");
        assert_eq!(answer, Answer::Unsolved);

        assert_eq!(derive("x^2 = 4"), Err(AlgebraError::Nonlinear(2)));
    }

    #[test]
    fn test_display() {
        let report = SolveReport {
            problem: "2x + 1 = 5".to_string(),
            trace: vec!["2*x + 1 = 5".to_string(), "2*x = 4".to_string()],
            final_reward: Some(18.0),
            derivation: vec!["Solution: x = 2".to_string()],
            answer: Answer::Solved("x".to_string(), Rational::from_integer(2)),
        };
        let expected = format!(
            "Problem: 2x + 1 = 5\n2*x + 1 = 5\n2*x = 4\nReward: 18\nSolution: x = 2\nFinal Solution: x = 2\n{}",
            "-".repeat(70)
        );
        assert_eq!(report.to_string(), expected);

        let report = SolveReport {
            answer: Answer::Unsolved,
            final_reward: Some(-1.0),
            derivation: vec![],
            ..report
        };
        assert!(report
            .to_string()
            .contains("Reward: -1\nFinal Solution: Could not solve\n"));
    }

    #[test]
    fn test_display_error() {
        let report = SolveReport {
            problem: "3x + 5".to_string(),
            trace: vec![],
            final_reward: None,
            derivation: vec![],
            answer: Answer::Error("missing '='".to_string()),
        };
        assert_eq!(
            report.to_string(),
            format!("3x + 5\nError: missing '='\n{}", "-".repeat(70))
        );
    }
}
