//! Configuration of a training run.
use algebrl_candle_agent::{
    dqn::{DqnConfig, DqnModelConfig},
    mlp::MlpConfig,
    opt::OptimizerConfig,
};
use algebrl_core::{DiscreteAct, FifoReplayBufferConfig, TrainerConfig};
use algebrl_env::{EquationAct, EquationEnvConfig};
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// The seed problem when none is given.
pub const BASE_PROBLEM: &str = "3(x - 2) + 5 = 2x + 11";

/// Bundles the configurations of all components.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct AlgebrlConfig {
    /// Number of problems generated from the seed problem.
    pub n_problems: usize,

    pub trainer: TrainerConfig,
    pub env: EquationEnvConfig,
    pub agent: DqnConfig<MlpConfig>,
    pub replay_buffer: FifoReplayBufferConfig,
}

impl Default for AlgebrlConfig {
    fn default() -> Self {
        let env = EquationEnvConfig::default();
        let model_config = DqnModelConfig::default()
            .q_config(MlpConfig::new(
                env.obs_dim,
                vec![64, 64],
                EquationAct::N_ACTIONS,
                false,
            ))
            .opt_config(OptimizerConfig::Adam { lr: 1e-3 });

        Self {
            n_problems: 50,
            trainer: TrainerConfig::default().max_steps_per_episode(50),
            env,
            agent: DqnConfig::default().model_config(model_config),
            replay_buffer: FifoReplayBufferConfig::default(),
        }
    }
}

impl AlgebrlConfig {
    /// Sets the number of generated problems.
    pub fn n_problems(mut self, v: usize) -> Self {
        self.n_problems = v;
        self
    }

    /// Loads [`AlgebrlConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config from {:?}", path);
        Ok(b)
    }

    /// Saves [`AlgebrlConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
