use std::path::{Path, PathBuf};

use savedmodel_core::{ArtifactCatalog, Error, Result, SAVED_MODEL_FILE_NAME};
use savedmodel_proto::{decode_saved_model, SavedModel};
use tokio::io::AsyncReadExt;
use tracing::info;

mod dtype;
mod extract;

pub use dtype::{map_native_dtype, native_dtype_name};
pub use extract::extract;

/// Path of the descriptor file inside an artifact directory.
pub fn descriptor_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(SAVED_MODEL_FILE_NAME)
}

/// Read and decode the descriptor of the artifact at `dir`.
pub async fn read_saved_model(dir: impl AsRef<Path>) -> Result<SavedModel> {
    let path = descriptor_path(dir);

    let mut file = tokio::fs::File::open(&path)
        .await
        .map_err(|source| Error::ArtifactNotFound {
            path: path.clone(),
            source,
        })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .await
        .map_err(|source| Error::ArtifactNotFound {
            path: path.clone(),
            source,
        })?;

    let saved_model = decode_saved_model(&bytes).map_err(|e| {
        Error::malformed(format!("cannot decode {}: {e}", path.display()))
    })?;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        meta_graphs = saved_model.meta_graphs.len(),
        "read SavedModel descriptor"
    );
    Ok(saved_model)
}

/// Catalog of metagraphs and signatures of the artifact at `dir`.
pub async fn read_meta_graphs(dir: impl AsRef<Path>) -> Result<ArtifactCatalog> {
    let saved_model = read_saved_model(dir).await?;
    extract(&saved_model)
}
