//! Learns rewrite strategies for linear equations with a DQN agent.
//!
//! The binary generates problems similar to a seed problem (see [`problems`]),
//! trains an [`EquationDqn`] on them with [`Trainer`], and finally solves the
//! seed problem with the trained agent (see [`solve`]).
pub mod config;
pub mod error;
pub mod ocr;
pub mod problems;
pub mod report;
pub mod solve;

use algebrl_candle_agent::{dqn::Dqn, mlp::Mlp};
use algebrl_core::{
    record::AggregateRecorder, FifoReplayBuffer, ReplayBufferBase, Trainer, TrainingReport,
};
use algebrl_env::{EquationAct, EquationEnv, EquationObs};
use anyhow::Result;
use config::AlgebrlConfig;
use log::info;

/// Replay buffer of [`EquationDqn`].
pub type ReplayBuffer = FifoReplayBuffer<EquationObs, EquationAct>;

/// DQN agent on [`EquationEnv`].
pub type EquationDqn = Dqn<EquationEnv, Mlp, ReplayBuffer>;

/// Builds an agent with an empty replay buffer.
pub fn build_agent(config: &AlgebrlConfig) -> Result<EquationDqn> {
    let buffer = ReplayBuffer::build(&config.replay_buffer);
    EquationDqn::build(config.agent.clone(), buffer)
}

/// Trains a new agent on `problems`.
pub fn train<S: AsRef<str>>(
    config: &AlgebrlConfig,
    problems: &[S],
    recorder: &mut dyn AggregateRecorder,
) -> Result<(EquationDqn, TrainingReport)> {
    let mut agent = build_agent(config)?;
    let mut trainer = Trainer::<EquationEnv>::build(config.trainer.clone(), config.env.clone());
    info!("Train on {} problems", problems.len());
    let report = trainer.train(&mut agent, problems, recorder)?;
    Ok((agent, report))
}
