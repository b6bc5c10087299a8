use algebrl::{
    build_agent,
    config::{AlgebrlConfig, BASE_PROBLEM},
    problems::{ProblemSource, TemplateProblemSource},
    report::write_outcomes,
    solve::{solve_problem, Answer},
};
use algebrl_algebra::Rational;
use algebrl_core::{record::BufferedRecorder, Agent, ProblemOutcome};
use anyhow::Result;
use std::fs;
use tempdir::TempDir;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config() -> AlgebrlConfig {
    let mut config = AlgebrlConfig::default().n_problems(8);
    config.trainer = config.trainer.max_steps_per_episode(10).flush_record_interval(4);
    config
}

#[test]
fn test_train_on_template_problems() -> Result<()> {
    init();
    let config = config();
    let problems = TemplateProblemSource::new(42).problems(BASE_PROBLEM, config.n_problems)?;
    let mut recorder = BufferedRecorder::new();

    let (agent, report) = algebrl::train(&config, &problems, &mut recorder)?;

    assert_eq!(report.n_episodes(), 8);
    assert_eq!(report.n_skipped(), 0);
    assert!(report.final_rewards().len() == 8);
    assert_eq!(recorder.flushed().len(), 2);
    assert_eq!(recorder.flushed()[1].0, 8);

    // Every episode takes at least one step and at most the env's step cap
    for outcome in report.outcomes() {
        match outcome {
            ProblemOutcome::Completed { outcome, .. } => {
                assert!(outcome.steps >= 1 && outcome.steps <= config.env.max_steps)
            }
            ProblemOutcome::Skipped { .. } => panic!("no problem is malformed"),
        }
    }
    assert!(agent.is_train());
    Ok(())
}

#[test]
fn test_malformed_problem_is_skipped() -> Result<()> {
    init();
    let config = config();
    let problems = [
        "2x + 1 = 5",
        "3x + 5",
        "x - 4 = 2",
        "x - 9223372036854775807 - 1 = 0",
    ];
    let mut recorder = BufferedRecorder::new();

    let (_, report) = algebrl::train(&config, &problems, &mut recorder)?;

    assert_eq!(report.n_episodes(), 2);
    assert_eq!(report.n_skipped(), 2);
    assert!(matches!(
        &report.outcomes()[1],
        ProblemOutcome::Skipped { problem, .. } if problem == "3x + 5"
    ));
    assert!(matches!(
        &report.outcomes()[3],
        ProblemOutcome::Skipped { error, .. } if error.contains("overflow")
    ));

    let dir = TempDir::new("outcomes")?;
    let path = dir.path().join("outcomes.csv");
    write_outcomes(&report, &path)?;
    let text = fs::read_to_string(&path)?;
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("problem,skipped,steps,"));
    assert!(lines[2].starts_with("3x + 5,true,0,"));
    Ok(())
}

#[test]
fn test_solve_problem() -> Result<()> {
    init();
    let config = config();
    let mut agent = build_agent(&config)?;

    let report = solve_problem("1. 3(x - 2) + 5 = 2x + 11", &mut agent, &config.env, 50)?;
    assert_eq!(report.problem, "3(x - 2) + 5 = 2x + 11");
    assert_eq!(
        report.answer,
        Answer::Solved("x".to_string(), Rational::from_integer(12))
    );
    assert!(!report.trace.is_empty() && report.trace.len() <= config.env.max_steps);
    assert!(report.final_reward.is_some());

    let text = report.to_string();
    assert!(text.starts_with("Problem: 3(x - 2) + 5 = 2x + 11\n"));
    assert_eq!(report.derivation.len(), 4);
    assert!(text.contains("\nOriginal: 3*(x - 2) + 5 = 2*x + 11\n"));
    assert!(text.contains("\nSolution: x = 12\nFinal Solution: x = 12\n"));
    assert!(text.ends_with(&"-".repeat(70)));
    Ok(())
}

#[test]
fn test_solve_malformed_problem() -> Result<()> {
    init();
    let config = config();
    let mut agent = build_agent(&config)?;

    let report = solve_problem("3x + 5", &mut agent, &config.env, 50)?;
    assert!(matches!(report.answer, Answer::Error(_)));
    assert!(report.to_string().starts_with("3x + 5\nError: "));
    Ok(())
}
