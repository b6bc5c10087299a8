//! DQN agent implemented with candle.
use super::{config::DqnConfig, explorer::EpsilonGreedy, model::DqnModel};
use crate::{model::SubModel1, util::Dims};
use algebrl_core::{
    record::{Record, RecordValue},
    Agent, CoreError, DiscreteAct, Env, ExperienceBufferBase, Obs, Policy, ReplayBufferBase,
    Transition,
};
use anyhow::Result;
use candle_core::{Device, Tensor};
use candle_nn::loss::mse;
use log::trace;
use rand::{rngs::SmallRng, SeedableRng};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

#[allow(clippy::upper_case_acronyms)]
/// DQN agent implemented with candle.
///
/// The agent owns its replay buffer. Every call to [`Agent::replay`] after the
/// warmup draws a batch and fits the model to the one-step target
/// `r + γ max_a' Q(s', a')` (or `r` for a transition that ended the episode),
/// one transition at a time, then decays ε.
pub struct Dqn<E, Q, R>
where
    E: Env,
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + Dims + Clone,
{
    pub(in crate::dqn) min_transitions_warmup: usize,
    pub(in crate::dqn) batch_size: usize,
    pub(in crate::dqn) qnet: DqnModel<Q>,
    pub(in crate::dqn) buffer: R,
    pub(in crate::dqn) train: bool,
    pub(in crate::dqn) phantom: PhantomData<E>,
    pub(in crate::dqn) discount_factor: f64,
    pub(in crate::dqn) explorer: EpsilonGreedy,
    pub(in crate::dqn) device: Device,
    pub(in crate::dqn) n_opts: usize,
    rng: SmallRng,
}

impl<E, Q, R> Dqn<E, Q, R>
where
    E: Env,
    E::Obs: TryInto<Tensor, Error = candle_core::Error>,
    E::Act: DiscreteAct,
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + Dims + Clone,
    R: ExperienceBufferBase<Item = Transition<E::Obs, E::Act>>
        + ReplayBufferBase<Batch = Vec<Transition<E::Obs, E::Act>>>,
{
    /// Constructs a DQN agent owning the given replay buffer.
    ///
    /// Fails if the output dimension of the model differs from the number of
    /// actions of the environment.
    pub fn build(config: DqnConfig<Q::Config>, buffer: R) -> Result<Self> {
        let device: Device = config.device.unwrap_or_default().try_into()?;
        let qnet = DqnModel::build(config.model_config, device.clone())?;
        if qnet.out_dim() != E::Act::N_ACTIONS {
            return Err(CoreError::DimensionMismatch {
                expected: E::Act::N_ACTIONS,
                actual: qnet.out_dim(),
            }
            .into());
        }

        Ok(Dqn {
            min_transitions_warmup: config.min_transitions_warmup.max(config.batch_size),
            batch_size: config.batch_size,
            qnet,
            buffer,
            train: config.train,
            phantom: PhantomData,
            discount_factor: config.discount_factor,
            explorer: config.explorer,
            device,
            n_opts: 0,
            rng: SmallRng::seed_from_u64(config.seed),
        })
    }

    /// The current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.explorer.epsilon()
    }

    /// Number of learning updates performed so far.
    pub fn n_opts(&self) -> usize {
        self.n_opts
    }

    pub fn buffer(&self) -> &R {
        &self.buffer
    }

    pub fn model(&self) -> &DqnModel<Q> {
        &self.qnet
    }

    /// Converts an observation into a batch of one.
    fn input(&self, obs: &E::Obs) -> Result<Tensor> {
        if obs.len() != self.qnet.in_dim() {
            return Err(CoreError::DimensionMismatch {
                expected: self.qnet.in_dim(),
                actual: obs.len(),
            }
            .into());
        }
        let x: Tensor = obs.clone().try_into()?;
        Ok(x.to_device(&self.device)?.unsqueeze(0)?)
    }

    /// Action values of an observation.
    pub fn scores(&self, obs: &E::Obs) -> Result<Vec<f32>> {
        self.qnet.scores(&self.input(obs)?)
    }

    /// Fits the value of the taken action to its one-step target.
    fn update(&mut self, tr: &Transition<E::Obs, E::Act>) -> Result<f32> {
        let target = match tr.is_done {
            true => tr.reward,
            false => {
                let next = self.scores(&tr.next_obs)?;
                let max = next.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                tr.reward + (self.discount_factor as f32) * max
            }
        };

        let x = self.input(&tr.obs)?;
        let pred = self.qnet.forward(&x)?;
        let mut tgt = pred.squeeze(0)?.to_vec1::<f32>()?;
        let ix = tr.act.index();
        let n_actions = tgt.len();
        let slot = tgt.get_mut(ix).ok_or(CoreError::ActionOutOfRange {
            index: ix,
            n_actions,
        })?;
        *slot = target;
        let tgt = Tensor::from_vec(tgt, (1, n_actions), &self.device)?;

        let loss = mse(&pred, &tgt)?;
        self.qnet.backward_step(&loss)?;
        Ok(loss.to_scalar::<f32>()?)
    }

    fn opt(&mut self) -> Result<Record> {
        let batch = self.buffer.batch(self.batch_size)?;
        let mut loss = 0f32;
        for tr in batch.iter() {
            loss += self.update(tr)?;
        }
        loss /= batch.len().max(1) as f32;

        self.explorer.step();
        self.n_opts += 1;
        trace!(
            "Update {} | loss {} | epsilon {}",
            self.n_opts,
            loss,
            self.explorer.epsilon()
        );

        Ok(Record::from_slice(&[
            ("loss", RecordValue::Scalar(loss)),
            ("epsilon", RecordValue::Scalar(self.explorer.epsilon() as f32)),
        ]))
    }
}

impl<E, Q, R> Policy<E> for Dqn<E, Q, R>
where
    E: Env,
    E::Obs: TryInto<Tensor, Error = candle_core::Error>,
    E::Act: DiscreteAct,
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + Dims + Clone,
    R: ExperienceBufferBase<Item = Transition<E::Obs, E::Act>>
        + ReplayBufferBase<Batch = Vec<Transition<E::Obs, E::Act>>>,
{
    /// In training mode the action is ε-greedy; in evaluation mode it is the
    /// action with the largest value.
    fn sample(&mut self, obs: &E::Obs) -> Result<E::Act> {
        let scores = self.scores(obs)?;
        let ix = match self.train {
            true => self.explorer.action(&scores, &mut self.rng),
            false => super::argmax(&scores),
        };
        E::Act::from_index(ix)
    }
}

impl<E, Q, R> Agent<E> for Dqn<E, Q, R>
where
    E: Env,
    E::Obs: TryInto<Tensor, Error = candle_core::Error>,
    E::Act: DiscreteAct,
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + Dims + Clone,
    R: ExperienceBufferBase<Item = Transition<E::Obs, E::Act>>
        + ReplayBufferBase<Batch = Vec<Transition<E::Obs, E::Act>>>,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn remember(&mut self, transition: Transition<E::Obs, E::Act>) -> Result<()> {
        self.buffer.push(transition)
    }

    fn replay(&mut self) -> Result<Option<Record>> {
        if self.buffer.len() < self.min_transitions_warmup {
            return Ok(None);
        }
        Ok(Some(self.opt()?))
    }
}
