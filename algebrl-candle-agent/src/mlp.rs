//! Multilayer perceptron.
mod base;
mod config;
pub use base::Mlp;
use candle_core::{Result, Tensor};
use candle_nn::{Linear, Module};
pub use config::MlpConfig;

/// Applies `layers` with ReLU between consecutive layers.
fn mlp_forward(xs: Tensor, layers: &[Linear]) -> Result<Tensor> {
    let mut xs = xs;
    for (i, layer) in layers.iter().enumerate() {
        xs = layer.forward(&xs)?;
        if i + 1 < layers.len() {
            xs = xs.relu()?;
        }
    }
    Ok(xs)
}
