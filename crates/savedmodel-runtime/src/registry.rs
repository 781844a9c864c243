use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use parking_lot::Mutex;
use savedmodel_core::{HandleId, Result, SessionId, TagSet};
use tracing::{debug, info};

/// One live model handle and the session backing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    pub handle: HandleId,
    pub path: PathBuf,
    pub tags: TagSet,
    pub session: SessionId,
}

#[derive(Default)]
struct Table {
    entries: BTreeMap<HandleId, RegistryEntry>,
    next_handle: u64,
}

impl Table {
    fn find_session(&self, path: &Path, tags: &TagSet) -> Option<SessionId> {
        self.entries
            .values()
            .find(|e| e.path == path && &e.tags == tags)
            .map(|e| e.session)
    }

    fn insert(&mut self, path: &Path, tags: &TagSet, session: SessionId) -> HandleId {
        let handle = HandleId(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(
            handle,
            RegistryEntry {
                handle,
                path: path.to_path_buf(),
                tags: tags.clone(),
                session,
            },
        );
        handle
    }

    /// Remove `handle`; returns its session if nothing else references it.
    fn remove(&mut self, handle: HandleId) -> Option<SessionId> {
        let entry = self.entries.remove(&handle)?;
        let shared = self.entries.values().any(|e| e.session == entry.session);
        (!shared).then_some(entry.session)
    }
}

/// Tracks which handles hold which engine sessions.
///
/// A session lives as long as at least one entry references it. Every
/// read-modify-write runs under one lock, so a session is never torn down
/// while another handle still points at it.
#[derive(Default)]
pub struct ArtifactRegistry {
    table: Mutex<Table>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, path: &Path, tags: &TagSet, session: SessionId) -> HandleId {
        let handle = self.table.lock().insert(path, tags, session);
        debug!(%handle, %session, path = %path.display(), %tags, "registered handle");
        handle
    }

    /// Session already held by a live handle for the same path and tags.
    pub fn find_reusable_session(&self, path: &Path, tags: &TagSet) -> Option<SessionId> {
        self.table.lock().find_session(path, tags)
    }

    /// Remove `handle`. Returns `true` when no other handle references its
    /// session any more, in which case the caller must destroy the session.
    /// Unknown handles are ignored.
    pub fn release(&self, handle: HandleId) -> bool {
        self.table.lock().remove(handle).is_some()
    }

    /// Reuse or create a session for `path`/`tags` and register a handle on
    /// it, atomically with respect to other registry operations.
    pub fn acquire<F>(&self, path: &Path, tags: &TagSet, create: F) -> Result<(HandleId, SessionId)>
    where
        F: FnOnce() -> anyhow::Result<SessionId>,
    {
        let mut table = self.table.lock();
        let session = match table.find_session(path, tags) {
            Some(session) => {
                debug!(%session, path = %path.display(), %tags, "reusing session");
                session
            }
            None => create().with_context(|| {
                format!("failed to create session for {} {tags}", path.display())
            })?,
        };
        let handle = table.insert(path, tags, session);
        Ok((handle, session))
    }

    /// [`release`](Self::release), running `teardown` on an orphaned
    /// session before the lock is dropped.
    pub fn release_with<F>(&self, handle: HandleId, teardown: F) -> Result<bool>
    where
        F: FnOnce(SessionId) -> anyhow::Result<()>,
    {
        let mut table = self.table.lock();
        let Some(session) = table.remove(handle) else {
            return Ok(false);
        };
        teardown(session).with_context(|| format!("failed to destroy session {session}"))?;
        info!(%handle, %session, "destroyed session");
        Ok(true)
    }

    pub fn entry(&self, handle: HandleId) -> Option<RegistryEntry> {
        self.table.lock().entries.get(&handle).cloned()
    }

    /// Number of live handles on `session`.
    pub fn session_references(&self, session: SessionId) -> usize {
        self.table
            .lock()
            .entries
            .values()
            .filter(|e| e.session == session)
            .count()
    }

    pub fn len(&self) -> usize {
        self.table.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.lock().entries.is_empty()
    }
}
