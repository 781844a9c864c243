pub mod handle;
pub mod load;
pub mod registry;

pub use handle::*;
pub use load::*;
pub use registry::*;
