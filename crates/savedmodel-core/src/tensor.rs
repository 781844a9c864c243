use bytes::Bytes;
use smallvec::SmallVec;

use crate::DType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape(pub SmallVec<[usize; 6]>);

impl Shape {
    pub fn from_slice(d: &[usize]) -> Self {
        Self(d.iter().copied().collect())
    }
    pub fn rank(&self) -> usize {
        self.0.len()
    }
    pub fn numel(&self) -> usize {
        self.0.iter().product::<usize>()
    }
}

/// Host tensor handed across the engine boundary.
/// The layout of `data` is the engine's business.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    pub dtype: DType,
    pub shape: Shape,
    pub data: Bytes,
}

impl Tensor {
    pub fn from_bytes(dtype: DType, shape: Shape, data: Bytes) -> Self {
        Self { dtype, shape, data }
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}
