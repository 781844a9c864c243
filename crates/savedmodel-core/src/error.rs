use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::{HandleId, TagSet};

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("SavedModel descriptor {} is missing or unreadable", .path.display())]
    ArtifactNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed SavedModel: {reason}")]
    MalformedArtifact { reason: String },
    #[error("unknown tensor DataType code {code}")]
    UnknownDtype { code: i32 },
    #[error("unsupported tensor DataType {name}; convert it to a supported dtype before exporting")]
    UnsupportedDtype { name: String },
    #[error("no MetaGraphDef tagged {tags} in the SavedModel")]
    TagsNotFound { tags: TagSet },
    #[error("signature {signature:?} not found in the MetaGraphDef tagged {tags}")]
    SignatureNotFound { signature: String, tags: TagSet },
    #[error("model handle {handle} has already been disposed")]
    AlreadyDisposed { handle: HandleId },
    #[error("model handle {handle} is disposed")]
    HandleDisposed { handle: HandleId },
    #[error("signature {signature:?} has no input {input:?}")]
    UnknownInput { signature: String, input: String },
    #[error("signature {signature:?} was given input {input:?} more than once")]
    DuplicateInput { signature: String, input: String },
    #[error("signature {signature:?} requires input {input:?}")]
    MissingInput { signature: String, input: String },
    #[error(transparent)]
    Engine(#[from] anyhow::Error),
}

impl Error {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedArtifact {
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
