//! Utilities.

/// Interface for handling input and output dimensions of a model.
pub trait Dims {
    /// Returns the input dimension.
    fn get_in_dim(&self) -> usize;

    /// Returns the output dimension.
    fn get_out_dim(&self) -> usize;

    /// Sets the output dimension.
    fn set_out_dim(&mut self, v: usize);
}
