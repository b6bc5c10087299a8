use algebrl::{
    config::{AlgebrlConfig, BASE_PROBLEM},
    ocr::{TesseractOcr, TextExtractor},
    problems::{ChatProblemGenerator, FileProblemSource, ProblemSource, TemplateProblemSource},
    report::{write_outcomes, STRATEGY_SUMMARY},
    solve::solve_problem,
};
use algebrl_algebra::normalize_problem_text;
use algebrl_core::record::LogRecorder;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Source {
    /// Ask a chat model (needs GROQ_API_KEY)
    Chat,

    /// Read problems from --problems-file
    File,

    /// Vary the numbers of the seed problem offline
    Template,
}

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed problem
    #[arg(short, long, default_value = BASE_PROBLEM)]
    problem: String,

    /// Read the seed problem from an image with tesseract
    #[arg(long)]
    image: Option<PathBuf>,

    /// Where training problems come from
    #[arg(short, long, value_enum, default_value_t = Source::Template)]
    source: Source,

    /// File with one problem per line
    #[arg(long)]
    problems_file: Option<PathBuf>,

    /// Number of training problems, overrides the config
    #[arg(short, long)]
    n_problems: Option<usize>,

    /// YAML configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed of the template problem source
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write per-problem outcomes to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn problem_source(args: &Args) -> Result<Box<dyn ProblemSource>> {
    Ok(match args.source {
        Source::Chat => Box::new(ChatProblemGenerator::from_env()?),
        Source::File => {
            let path = args
                .problems_file
                .as_ref()
                .context("--problems-file is required with --source file")?;
            Box::new(FileProblemSource::new(path))
        }
        Source::Template => Box::new(TemplateProblemSource::new(args.seed)),
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AlgebrlConfig::load(path)?,
        None => AlgebrlConfig::default(),
    };
    if let Some(n) = args.n_problems {
        config = config.n_problems(n);
    }

    let seed_problem = match &args.image {
        Some(image) => TesseractOcr::default().extract(image)?,
        None => normalize_problem_text(&args.problem),
    };
    info!("Seed problem: {}", seed_problem);

    info!("Generating {} problems similar to the seed problem", config.n_problems);
    let problems = problem_source(&args)?.problems(&seed_problem, config.n_problems)?;

    let mut recorder = LogRecorder::new();
    let (mut agent, report) = algebrl::train(&config, &problems, &mut recorder)?;

    println!("\nTRAINING COMPLETE");
    println!("{}", report);
    if let Some(path) = &args.csv {
        write_outcomes(&report, path)?;
        info!("Wrote outcomes to {:?}", path);
    }

    println!("\nLEARNED STRATEGY:");
    println!("{}", STRATEGY_SUMMARY);

    println!("\nFINAL SOLUTION FOR ORIGINAL PROBLEM:");
    let solved = solve_problem(
        &seed_problem,
        &mut agent,
        &config.env,
        config.trainer.max_steps_per_episode,
    )?;
    println!("{}", solved);

    Ok(())
}
