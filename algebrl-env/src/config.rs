//! Configuration of [`EquationEnv`](crate::EquationEnv).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`EquationEnv`](crate::EquationEnv).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EquationEnvConfig {
    /// Number of steps after which an episode is cut.
    pub max_steps: usize,

    /// Length of observations.
    pub obs_dim: usize,
}

impl Default for EquationEnvConfig {
    fn default() -> Self {
        Self {
            max_steps: 6,
            obs_dim: 128,
        }
    }
}

impl EquationEnvConfig {
    /// Sets the step cap of episodes.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the length of observations.
    pub fn obs_dim(mut self, v: usize) -> Self {
        self.obs_dim = v;
        self
    }

    /// Constructs [`EquationEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EquationEnvConfig`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_env_config() -> Result<()> {
        let config = EquationEnvConfig::default().max_steps(10).obs_dim(64);
        let dir = TempDir::new("env_config")?;
        let path = dir.path().join("env_config.yaml");

        config.save(&path)?;
        assert_eq!(EquationEnvConfig::load(&path)?, config);
        Ok(())
    }
}
