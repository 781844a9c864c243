use std::collections::BTreeMap;

use crate::DType;

/// Signature key TensorFlow reserves for the initializer op. Never surfaced.
pub const INIT_OP_SIGNATURE_KEY: &str = "__saved_model_init_op";

/// Output-index suffix carried by graph-internal tensor names.
pub const OUTPUT_INDEX_SUFFIX: &str = ":0";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TensorInfo {
    /// Graph-internal tensor name, e.g. `serving_default_x:0`.
    pub name: String,
    pub dtype: DType,
    /// Artifact-native dtype label, e.g. `DT_FLOAT`.
    pub native_dtype: String,
    /// Dimension sizes; `-1` = unknown. A shape of unknown rank is recorded
    /// as an empty list, the same as a scalar.
    pub shape: Vec<i64>,
}

impl TensorInfo {
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Dimensions with unknown sizes as `None`.
    pub fn dims(&self) -> Vec<Option<usize>> {
        self.shape
            .iter()
            .map(|d| usize::try_from(*d).ok())
            .collect()
    }

    /// Same tensor with the trailing `:0` stripped from its name.
    pub fn normalized(&self) -> TensorInfo {
        TensorInfo {
            name: normalize_tensor_name(&self.name).to_string(),
            ..self.clone()
        }
    }
}

pub fn normalize_tensor_name(name: &str) -> &str {
    name.strip_suffix(OUTPUT_INDEX_SUFFIX).unwrap_or(name)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureDefEntry {
    pub inputs: BTreeMap<String, TensorInfo>,
    pub outputs: BTreeMap<String, TensorInfo>,
    /// e.g. `tensorflow/serving/predict`; empty when the exporter left it unset.
    pub method_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, shape: Vec<i64>) -> TensorInfo {
        TensorInfo {
            name: name.to_string(),
            dtype: DType::Float32,
            native_dtype: "DT_FLOAT".to_string(),
            shape,
        }
    }

    #[test]
    fn strips_only_the_first_output_suffix() {
        assert_eq!(normalize_tensor_name("output:0"), "output");
        assert_eq!(normalize_tensor_name("output"), "output");
        assert_eq!(normalize_tensor_name("split:1"), "split:1");
        assert_eq!(info("input_x:0", vec![-1, 4]).normalized().name, "input_x");
    }

    #[test]
    fn unknown_dims_surface_as_none() {
        let t = info("x:0", vec![-1, 4]);
        assert_eq!(t.rank(), 2);
        assert_eq!(t.dims(), vec![None, Some(4)]);
    }
}
