use crate::{Result, Tensor, TensorInfo};

/// A model that can be fed tensors by logical name.
pub trait InferenceModel: Send {
    /// Input descriptors; names never carry the `:0` suffix.
    fn inputs(&self) -> Vec<TensorInfo>;

    /// Output descriptors; names never carry the `:0` suffix.
    fn outputs(&self) -> Vec<TensorInfo>;

    /// Inputs and results are keyed by the signature's logical keys.
    fn predict(&self, inputs: Vec<(String, Tensor)>) -> Result<Vec<(String, Tensor)>>;

    /// Release the model. Calling this twice is an error.
    fn dispose(&mut self) -> Result<()>;
}
