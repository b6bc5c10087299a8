//! Train [`Agent`] over a batch of problems.
mod config;
mod report;
use crate::{
    record::{AggregateRecorder, Record, RecordValue, Recorder},
    Agent, Env, Transition,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::{debug, info, warn};
pub use report::{EpisodeOutcome, ProblemOutcome, TrainingReport};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the training loop over a batch of problems.
///
/// # Training loop
///
/// For each problem of the batch:
///
/// 1. Build an [`Env`] and reset it with the problem. If the reset fails the
///    problem is reported as skipped and the next problem is taken.
/// 2. Until the episode is done or `max_steps_per_episode` steps are taken:
///     1. The agent samples an action for the current observation.
///     2. The environment applies the action.
///     3. The transition is handed to the agent with [`Agent::remember`].
///     4. The agent performs a learning update with [`Agent::replay`].
/// 3. The final reward of the episode is stored in the recorder.
///
/// Errors raised by the agent are not skipped; they abort the run.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|A
///     B -->|"Step&lt;E: Env&gt;"|C[Transition]
///     C -->|Agent::remember|A
/// ```
pub struct Trainer<E: Env> {
    /// Configuration of the environment built for each problem.
    env_config: E::Config,

    /// The maximum number of environment steps per problem.
    max_steps_per_episode: usize,

    /// Interval of flushing records, in problems.
    flush_record_interval: usize,

    /// Base of the random seeds given to environments.
    seed: i64,
}

impl<E: Env> Trainer<E> {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig, env_config: E::Config) -> Self {
        Self {
            env_config,
            max_steps_per_episode: config.max_steps_per_episode,
            flush_record_interval: config.flush_record_interval.max(1),
            seed: config.seed,
        }
    }

    /// Runs an episode from the observation `obs` returned by [`Env::reset`].
    ///
    /// Every step record of the environment is written to `recorder`. The
    /// returned [`Record`] summarizes the episode and carries the information of
    /// the last learning update of the agent.
    pub fn run_episode<A>(
        &self,
        env: &mut E,
        agent: &mut A,
        obs: E::Obs,
        recorder: &mut dyn Recorder,
    ) -> Result<(EpisodeOutcome, Record)>
    where
        A: Agent<E>,
    {
        let mut obs = obs;
        let mut outcome = EpisodeOutcome {
            steps: 0,
            final_reward: None,
            total_reward: 0.0,
            is_terminated: false,
            is_done: false,
        };
        let mut record_agent = Record::empty();

        while outcome.steps < self.max_steps_per_episode {
            let act = agent.sample(&obs)?;
            let (step, record_env) = env.step(&act)?;
            recorder.write(record_env);
            outcome.steps += 1;
            outcome.final_reward = Some(step.reward);
            outcome.total_reward += step.reward;
            outcome.is_terminated = step.is_terminated;
            outcome.is_done = step.is_done();

            let next_obs = step.obs.clone();
            agent.remember(Transition::from_step(obs, &step))?;
            if let Some(record) = agent.replay()? {
                record_agent = record;
            }
            obs = next_obs;

            if outcome.is_done {
                break;
            }
        }

        let mut record = Record::from_slice(&[
            ("steps", RecordValue::Scalar(outcome.steps as f32)),
            ("total_reward", RecordValue::Scalar(outcome.total_reward)),
            (
                "solved",
                RecordValue::Scalar(if outcome.is_terminated { 1.0 } else { 0.0 }),
            ),
        ]);
        if let Some(r) = outcome.final_reward {
            record.insert("final_reward", RecordValue::Scalar(r));
        }
        record.merge_inplace(record_agent);

        Ok((outcome, record))
    }

    /// Trains the agent on the given problems.
    ///
    /// Problems whose reset fails are skipped and reported in the returned
    /// [`TrainingReport`]; they do not stop the run.
    pub fn train<A, I, S>(
        &mut self,
        agent: &mut A,
        problems: I,
        recorder: &mut dyn AggregateRecorder,
    ) -> Result<TrainingReport>
    where
        A: Agent<E>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = TrainingReport::default();
        let mut step_recorder = crate::record::NullRecorder {};
        let mut n_problems = 0;
        agent.train();

        for (ix, problem) in problems.into_iter().enumerate() {
            let problem = problem.as_ref();
            n_problems = ix + 1;
            let mut env = E::build(&self.env_config, self.seed + ix as i64)?;

            let obs = match env.reset(problem) {
                Ok(obs) => obs,
                Err(e) => {
                    warn!("Problem {:02} | Skipped {:?}: {:#}", ix + 1, problem, e);
                    report.push(ProblemOutcome::Skipped {
                        problem: problem.to_string(),
                        error: format!("{:#}", e),
                    });
                    continue;
                }
            };

            let (outcome, record) = self.run_episode(&mut env, agent, obs, &mut step_recorder)?;
            match outcome.final_reward {
                Some(r) => info!("Problem {:02} | Final reward: {}", ix + 1, r),
                None => info!("Problem {:02} | No step taken", ix + 1),
            }
            debug!("Problem {:02} | {:?}", ix + 1, outcome);
            recorder.store(record);

            if n_problems % self.flush_record_interval == 0 {
                recorder.flush(n_problems as _);
            }

            report.push(ProblemOutcome::Completed {
                problem: problem.to_string(),
                outcome,
            });
        }

        if n_problems % self.flush_record_interval != 0 {
            recorder.flush(n_problems as _);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record::BufferedRecorder, Act, Obs, Policy, Step};
    use anyhow::{anyhow, Result};

    #[derive(Clone, Debug, PartialEq)]
    struct CountObs(Vec<f32>);

    impl Obs for CountObs {
        fn len(&self) -> usize {
            self.0.len()
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    struct CountAct(usize);

    impl Act for CountAct {}

    /// Counts up to the number given as the problem; action 1 increments.
    struct CountEnv {
        target: usize,
        count: usize,
        steps: usize,
        max_steps: usize,
    }

    impl Env for CountEnv {
        type Config = usize;
        type Obs = CountObs;
        type Act = CountAct;
        type Info = ();

        fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
            Ok(Self {
                target: 0,
                count: 0,
                steps: 0,
                max_steps: *config,
            })
        }

        fn reset(&mut self, problem: &str) -> Result<Self::Obs> {
            self.target = problem.trim().parse()?;
            self.count = 0;
            self.steps = 0;
            self.encode_state()
        }

        fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
            self.steps += 1;
            let reward = if a.0 == 1 {
                self.count += 1;
                1.0
            } else {
                -1.0
            };
            let is_terminated = self.count == self.target;
            let is_truncated = self.steps >= self.max_steps;
            let step = Step::new(
                self.encode_state()?,
                a.clone(),
                reward,
                is_terminated,
                is_truncated,
                (),
            );
            Ok((step, Record::from_scalar("reward", reward)))
        }

        fn encode_state(&self) -> Result<Self::Obs> {
            Ok(CountObs(vec![self.count as f32]))
        }
    }

    #[derive(Default)]
    struct AlwaysIncrement {
        remembered: Vec<Transition<CountObs, CountAct>>,
        n_replays: usize,
        fail_on_sample: bool,
    }

    impl Policy<CountEnv> for AlwaysIncrement {
        fn sample(&mut self, _obs: &CountObs) -> Result<CountAct> {
            match self.fail_on_sample {
                true => Err(anyhow!("broken policy")),
                false => Ok(CountAct(1)),
            }
        }
    }

    impl Agent<CountEnv> for AlwaysIncrement {
        fn train(&mut self) {}

        fn eval(&mut self) {}

        fn is_train(&self) -> bool {
            true
        }

        fn remember(&mut self, transition: Transition<CountObs, CountAct>) -> Result<()> {
            self.remembered.push(transition);
            Ok(())
        }

        fn replay(&mut self) -> Result<Option<Record>> {
            self.n_replays += 1;
            Ok(Some(Record::from_scalar("loss", 0.5)))
        }
    }

    #[test]
    fn test_train_skips_bad_problems() -> Result<()> {
        let config = TrainerConfig::default().max_steps_per_episode(50);
        let mut trainer = Trainer::<CountEnv>::build(config, 6);
        let mut agent = AlwaysIncrement::default();
        let mut recorder = BufferedRecorder::new();

        let problems = ["2", "not a number", "3"];
        let report = trainer.train(&mut agent, problems.iter(), &mut recorder)?;

        assert_eq!(report.n_episodes(), 2);
        assert_eq!(report.n_skipped(), 1);
        assert_eq!(report.n_solved(), 2);
        assert_eq!(agent.remembered.len(), 5);
        assert_eq!(agent.n_replays, 5);
        assert!(agent.remembered[1].is_done);
        assert!(!agent.remembered[0].is_done);
        assert_eq!(agent.remembered[0].next_obs, CountObs(vec![1.0]));

        let (step, record) = &recorder.flushed()[0];
        assert_eq!(*step, 3);
        assert_eq!(record.get_scalar("steps_mean")?, 2.5);
        assert_eq!(record.get_scalar("loss_mean")?, 0.5);
        Ok(())
    }

    #[test]
    fn test_episode_stops_at_env_limit() -> Result<()> {
        let mut trainer = Trainer::<CountEnv>::build(TrainerConfig::default(), 6);
        let mut agent = AlwaysIncrement::default();
        let mut recorder = BufferedRecorder::new();

        let report = trainer.train(&mut agent, ["10"], &mut recorder)?;
        match &report.outcomes()[0] {
            ProblemOutcome::Completed { outcome, .. } => {
                assert_eq!(outcome.steps, 6);
                assert!(outcome.is_done);
                assert!(!outcome.is_terminated);
            }
            _ => panic!("the episode should have run"),
        }
        Ok(())
    }

    #[test]
    fn test_episode_budget() -> Result<()> {
        let config = TrainerConfig::default().max_steps_per_episode(2);
        let mut trainer = Trainer::<CountEnv>::build(config, 6);
        let mut agent = AlwaysIncrement::default();
        let mut recorder = BufferedRecorder::new();

        let report = trainer.train(&mut agent, ["10"], &mut recorder)?;
        assert_eq!(agent.remembered.len(), 2);
        assert_eq!(report.final_rewards(), vec![1.0]);
        Ok(())
    }

    #[test]
    fn test_agent_error_aborts() {
        let mut trainer = Trainer::<CountEnv>::build(TrainerConfig::default(), 6);
        let mut agent = AlwaysIncrement {
            fail_on_sample: true,
            ..Default::default()
        };
        let mut recorder = BufferedRecorder::new();
        assert!(trainer.train(&mut agent, ["1", "2"], &mut recorder).is_err());
    }
}
