//! Shared fixtures for service unit tests.

use std::sync::Arc;

use uuid::Uuid;

use nimbus_storage::MemoryBlobStore;
use nimbus_store::memory::MemoryStore;
use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

use crate::context::RequestContext;
use crate::folder::TreeWalker;
use crate::guard::OwnershipGuard;

/// One in-memory store plus one in-memory blob store.
pub(crate) struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub blobs: Arc<MemoryBlobStore>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            blobs: Arc::new(MemoryBlobStore::new()),
        }
    }

    pub fn folders(&self) -> Arc<dyn FolderStore> {
        self.store.clone()
    }

    pub fn files(&self) -> Arc<dyn FileStore> {
        self.store.clone()
    }

    pub fn notes(&self) -> Arc<dyn NoteStore> {
        self.store.clone()
    }

    pub fn guard(&self) -> OwnershipGuard {
        OwnershipGuard::new(self.folders(), self.files(), self.notes())
    }

    pub fn walker(&self) -> TreeWalker {
        TreeWalker::new(self.folders(), self.files(), self.notes())
    }
}

pub(crate) fn ctx_for(user_id: Uuid) -> RequestContext {
    RequestContext::new(user_id)
}
