use std::path::Path;
use std::sync::Arc;

use savedmodel_core::{ExecutionEngine, Result, TagSet};
use savedmodel_loader::read_meta_graphs;

use crate::{ArtifactRegistry, ModelHandle};

/// Signature the default exporter writes for serving.
pub const DEFAULT_SIGNATURE: &str = "serving_default";

/// Which metagraph and signature of an artifact to bind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub tags: TagSet,
    pub signature: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            tags: TagSet::serve(),
            signature: DEFAULT_SIGNATURE.to_string(),
        }
    }
}

impl LoadOptions {
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }
}

/// Loads SavedModel signatures into handles sharing one registry and engine.
#[derive(Clone)]
pub struct SavedModelLoader {
    registry: Arc<ArtifactRegistry>,
    engine: Arc<dyn ExecutionEngine>,
}

impl SavedModelLoader {
    pub fn new(registry: Arc<ArtifactRegistry>, engine: Arc<dyn ExecutionEngine>) -> Self {
        Self { registry, engine }
    }

    pub fn registry(&self) -> &Arc<ArtifactRegistry> {
        &self.registry
    }

    /// Read the artifact at `dir`, resolve the requested signature and bind
    /// it to a session.
    pub async fn load(&self, dir: impl AsRef<Path>, options: &LoadOptions) -> Result<ModelHandle> {
        let dir = dir.as_ref();
        let catalog = read_meta_graphs(dir).await?;
        let signature = catalog.resolve(&options.tags, &options.signature)?.clone();

        ModelHandle::new(
            self.registry.clone(),
            self.engine.clone(),
            dir,
            &options.tags,
            &options.signature,
            signature,
        )
    }
}
