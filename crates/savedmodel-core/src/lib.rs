pub mod artifact;
pub mod dtype;
pub mod engine;
pub mod error;
pub mod model;
pub mod signature;
pub mod tags;
pub mod tensor;

pub use artifact::*;
pub use dtype::*;
pub use engine::*;
pub use error::*;
pub use model::*;
pub use signature::*;
pub use tags::*;
pub use tensor::*;
