use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use savedmodel_core::{
    Error, ExecutionEngine, HandleId, InferenceModel, Result, SessionId, SignatureDefEntry,
    TagSet, Tensor, TensorInfo,
};
use tracing::{info, warn};

use crate::ArtifactRegistry;

/// A signature of a loaded SavedModel, bound to a (possibly shared) engine
/// session.
///
/// The handle stays registered until [`dispose`](InferenceModel::dispose) is
/// called or it is dropped; the session is destroyed with the last handle
/// referencing it.
pub struct ModelHandle {
    handle: HandleId,
    session: SessionId,
    path: PathBuf,
    tags: TagSet,
    signature_name: String,
    signature: SignatureDefEntry,
    registry: Arc<ArtifactRegistry>,
    engine: Arc<dyn ExecutionEngine>,
    disposed: bool,
}

impl ModelHandle {
    /// Register a handle for `signature`, reusing a live session for the same
    /// path and tags or asking `engine` for a new one.
    pub fn new(
        registry: Arc<ArtifactRegistry>,
        engine: Arc<dyn ExecutionEngine>,
        path: &Path,
        tags: &TagSet,
        signature_name: &str,
        signature: SignatureDefEntry,
    ) -> Result<Self> {
        let (handle, session) = registry.acquire(path, tags, || {
            engine.create_or_get_session(path, tags)
        })?;

        info!(
            %handle,
            %session,
            engine = engine.name(),
            path = %path.display(),
            %tags,
            signature = signature_name,
            "model handle created"
        );

        Ok(Self {
            handle,
            session,
            path: path.to_path_buf(),
            tags: tags.clone(),
            signature_name: signature_name.to_string(),
            signature,
            registry,
            engine,
            disposed: false,
        })
    }

    pub fn handle_id(&self) -> HandleId {
        self.handle
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn signature_name(&self) -> &str {
        &self.signature_name
    }

    /// The bound signature with graph-internal tensor names.
    pub fn signature(&self) -> &SignatureDefEntry {
        &self.signature
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn release(&self) -> Result<bool> {
        let engine = &self.engine;
        self.registry
            .release_with(self.handle, |session| engine.destroy_session(session))
    }
}

impl InferenceModel for ModelHandle {
    fn inputs(&self) -> Vec<TensorInfo> {
        self.signature.inputs.values().map(TensorInfo::normalized).collect()
    }

    fn outputs(&self) -> Vec<TensorInfo> {
        self.signature.outputs.values().map(TensorInfo::normalized).collect()
    }

    fn predict(&self, inputs: Vec<(String, Tensor)>) -> Result<Vec<(String, Tensor)>> {
        if self.disposed {
            return Err(Error::HandleDisposed {
                handle: self.handle,
            });
        }

        let mut provided = BTreeMap::new();
        for (key, tensor) in inputs {
            if !self.signature.inputs.contains_key(&key) {
                return Err(Error::UnknownInput {
                    signature: self.signature_name.clone(),
                    input: key,
                });
            }
            if provided.contains_key(&key) {
                return Err(Error::DuplicateInput {
                    signature: self.signature_name.clone(),
                    input: key,
                });
            }
            provided.insert(key, tensor);
        }

        let mut feeds = Vec::with_capacity(provided.len());
        for (key, info) in &self.signature.inputs {
            let tensor = provided.remove(key).ok_or_else(|| Error::MissingInput {
                signature: self.signature_name.clone(),
                input: key.clone(),
            })?;
            feeds.push((info.name.clone(), tensor));
        }

        let fetches = self
            .signature
            .outputs
            .values()
            .map(|info| info.name.clone())
            .collect::<Vec<_>>();

        let results = self
            .engine
            .run(self.session, feeds, &fetches)
            .with_context(|| {
                format!(
                    "running signature {:?} on session {}",
                    self.signature_name, self.session
                )
            })?;
        if results.len() != fetches.len() {
            return Err(anyhow!(
                "signature {:?} expects {} outputs, engine returned {}",
                self.signature_name,
                fetches.len(),
                results.len()
            )
            .into());
        }

        Ok(self.signature.outputs.keys().cloned().zip(results).collect())
    }

    fn dispose(&mut self) -> Result<()> {
        if self.disposed {
            return Err(Error::AlreadyDisposed {
                handle: self.handle,
            });
        }
        self.disposed = true;

        let destroyed = self.release()?;
        info!(
            handle = %self.handle,
            session = %self.session,
            session_destroyed = destroyed,
            "model handle disposed"
        );
        Ok(())
    }
}

impl Drop for ModelHandle {
    fn drop(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Err(err) = self.release() {
            warn!(handle = %self.handle, error = %err, "failed to release dropped model handle");
        }
    }
}
