use std::fmt;
use std::path::Path;

use anyhow::Result;

use crate::{TagSet, Tensor};

/// Session id issued by an [`ExecutionEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// Process-unique id of a model handle. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The inference engine that owns loaded graph sessions.
///
/// Sessions are shared between handles; callers only ask for a new one after
/// checking that no live handle already holds a session for the same path
/// and tags.
pub trait ExecutionEngine: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn create_or_get_session(&self, path: &Path, tags: &TagSet) -> Result<SessionId>;

    fn destroy_session(&self, session: SessionId) -> Result<()>;

    /// Feed `inputs` (graph-internal names) and fetch `outputs` in order.
    fn run(
        &self,
        session: SessionId,
        inputs: Vec<(String, Tensor)>,
        outputs: &[String],
    ) -> Result<Vec<Tensor>>;
}
