use std::collections::BTreeMap;

use crate::{Error, Result, SignatureDefEntry, TagSet};

/// Descriptor file read from inside an artifact directory.
pub const SAVED_MODEL_FILE_NAME: &str = "saved_model.pb";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaGraphInfo {
    pub tags: TagSet,
    pub signature_defs: BTreeMap<String, SignatureDefEntry>,
}

/// Metagraphs of one artifact, in the order the descriptor lists them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtifactCatalog {
    pub meta_graphs: Vec<MetaGraphInfo>,
}

impl ArtifactCatalog {
    pub fn new(meta_graphs: Vec<MetaGraphInfo>) -> Self {
        Self { meta_graphs }
    }

    /// First metagraph whose tag set equals `tags`.
    pub fn meta_graph(&self, tags: &TagSet) -> Option<&MetaGraphInfo> {
        self.meta_graphs.iter().find(|mg| &mg.tags == tags)
    }

    /// Find the signature `name` in the metagraph tagged exactly `tags`.
    ///
    /// When several metagraphs carry the same tag set the first one wins,
    /// even if a later one would have the signature.
    pub fn resolve(&self, tags: &TagSet, name: &str) -> Result<&SignatureDefEntry> {
        let meta_graph = self.meta_graph(tags).ok_or_else(|| Error::TagsNotFound {
            tags: tags.clone(),
        })?;

        meta_graph
            .signature_defs
            .get(name)
            .ok_or_else(|| Error::SignatureNotFound {
                signature: name.to_string(),
                tags: tags.clone(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetaGraphInfo> {
        self.meta_graphs.iter()
    }

    pub fn len(&self) -> usize {
        self.meta_graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meta_graphs.is_empty()
    }
}
