use std::collections::BTreeMap;

use savedmodel_core::{
    ArtifactCatalog, Error, MetaGraphInfo, Result, SignatureDefEntry, TagSet, TensorInfo,
    INIT_OP_SIGNATURE_KEY,
};
use savedmodel_proto::{tensor_info::Encoding, SavedModel, SignatureDef};
use tracing::debug;

use crate::dtype::{map_native_dtype, native_dtype_name};

/// Build the signature catalog of a decoded descriptor.
pub fn extract(saved_model: &SavedModel) -> Result<ArtifactCatalog> {
    if saved_model.meta_graphs.is_empty() {
        return Err(Error::malformed("descriptor contains no meta graphs"));
    }

    let meta_graphs = saved_model
        .meta_graphs
        .iter()
        .enumerate()
        .map(|(idx, meta_graph)| -> Result<MetaGraphInfo> {
            let meta_info = meta_graph.meta_info_def.as_ref().ok_or_else(|| {
                Error::malformed(format!("meta graph #{idx} has no meta_info_def"))
            })?;
            let tags: TagSet = meta_info.tags.iter().cloned().collect();

            let mut signature_defs = BTreeMap::new();
            for (key, signature) in &meta_graph.signature_def {
                if key == INIT_OP_SIGNATURE_KEY {
                    continue;
                }
                signature_defs.insert(key.clone(), signature_entry(key, signature)?);
            }

            debug!(%tags, signatures = signature_defs.len(), "extracted meta graph");
            Ok(MetaGraphInfo {
                tags,
                signature_defs,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ArtifactCatalog::new(meta_graphs))
}

fn signature_entry(key: &str, signature: &SignatureDef) -> Result<SignatureDefEntry> {
    Ok(SignatureDefEntry {
        inputs: tensor_map(key, &signature.inputs)?,
        outputs: tensor_map(key, &signature.outputs)?,
        method_name: signature.method_name.clone(),
    })
}

fn tensor_map(
    signature: &str,
    tensors: &BTreeMap<String, savedmodel_proto::TensorInfo>,
) -> Result<BTreeMap<String, TensorInfo>> {
    let mut out = BTreeMap::new();
    for (key, info) in tensors {
        out.insert(key.clone(), tensor_info(signature, key, info)?);
    }
    Ok(out)
}

fn tensor_info(
    signature: &str,
    key: &str,
    info: &savedmodel_proto::TensorInfo,
) -> Result<TensorInfo> {
    let name = match &info.encoding {
        Some(Encoding::Name(name)) => name.clone(),
        Some(Encoding::CooSparse(_)) => {
            return Err(Error::malformed(format!(
                "tensor {key:?} of signature {signature:?} is sparse; only dense tensors can be bound"
            )))
        }
        Some(Encoding::CompositeTensor(_)) => {
            return Err(Error::malformed(format!(
                "tensor {key:?} of signature {signature:?} is a composite tensor; only dense tensors can be bound"
            )))
        }
        None => {
            return Err(Error::malformed(format!(
                "tensor {key:?} of signature {signature:?} has no tensor name"
            )))
        }
    };

    let shape = info.tensor_shape.as_ref().ok_or_else(|| {
        Error::malformed(format!(
            "tensor {key:?} of signature {signature:?} has no tensor_shape"
        ))
    })?;

    // An unknown-rank shape carries no dims and surfaces as an empty list.
    let dims = shape.dim.iter().map(|d| d.size).collect::<Vec<_>>();
    if let Some(bad) = dims.iter().find(|d| **d < -1) {
        return Err(Error::malformed(format!(
            "tensor {key:?} of signature {signature:?} has invalid dimension {bad}"
        )));
    }

    Ok(TensorInfo {
        name,
        dtype: map_native_dtype(info.dtype)?,
        native_dtype: native_dtype_name(info.dtype)?.to_string(),
        shape: dims,
    })
}
