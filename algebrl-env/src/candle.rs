//! Conversion of observations into candle tensors.
use crate::EquationObs;
use candle_core::{Device, Tensor};

impl TryFrom<EquationObs> for Tensor {
    type Error = candle_core::Error;

    /// Builds a 1-dimensional tensor on the CPU.
    fn try_from(obs: EquationObs) -> Result<Self, Self::Error> {
        let n = obs.0.len();
        Tensor::from_vec(obs.0, (n,), &Device::Cpu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obs_to_tensor() -> anyhow::Result<()> {
        let obs = EquationObs::encode("x = 1", 16);
        let t = Tensor::try_from(obs.clone())?;
        assert_eq!(t.dims(), &[16]);
        assert_eq!(t.to_vec1::<f32>()?, obs.as_slice());
        Ok(())
    }
}
