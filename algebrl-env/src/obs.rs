//! Observation of [`EquationEnv`](crate::EquationEnv).
use algebrl_core::Obs;

/// Fixed-length encoding of an equation.
///
/// Slot `i` holds the code of the `i`-th character of the rendered equation divided
/// by 128. Shorter texts are padded with zeros, longer ones truncated.
#[derive(Clone, Debug, PartialEq)]
pub struct EquationObs(pub(crate) Vec<f32>);

impl EquationObs {
    /// Encodes `text` into `dim` slots.
    pub fn encode(text: &str, dim: usize) -> Self {
        let mut v = vec![0f32; dim];
        for (slot, c) in v.iter_mut().zip(text.chars()) {
            *slot = c as u32 as f32 / 128.0;
        }
        Self(v)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for EquationObs {
    fn from(v: Vec<f32>) -> Self {
        Self(v)
    }
}

impl Obs for EquationObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pads() {
        let obs = EquationObs::encode("x = 1", 8);
        assert_eq!(obs.len(), 8);
        assert_eq!(obs.as_slice()[0], 120.0 / 128.0);
        assert_eq!(obs.as_slice()[1], 32.0 / 128.0);
        assert_eq!(&obs.as_slice()[5..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_encode_truncates() {
        let text = "x".repeat(200);
        let obs = EquationObs::encode(&text, 128);
        assert_eq!(obs.len(), 128);
        assert!(obs.as_slice().iter().all(|v| *v == 120.0 / 128.0));
    }
}
