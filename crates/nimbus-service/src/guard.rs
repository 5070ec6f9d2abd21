//! Ownership enforcement for id-addressed entity access.
//!
//! Every lookup of a concrete entity resolves through the guard, which
//! fetches the record and checks the owner in one step. A missing entity
//! and a foreign-owned entity produce the same not-found error, so callers
//! cannot probe ids they do not own.

use std::sync::Arc;

use uuid::Uuid;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_entity::{Entity, EntityKind, EntityRef, File, Folder, Note};
use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

use crate::context::RequestContext;

/// Resolves entity ids to records owned by the acting user.
#[derive(Debug, Clone)]
pub struct OwnershipGuard {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    notes: Arc<dyn NoteStore>,
}

impl OwnershipGuard {
    /// Creates a new guard over the three entity stores.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        notes: Arc<dyn NoteStore>,
    ) -> Self {
        Self {
            folders,
            files,
            notes,
        }
    }

    /// Resolve a folder the acting user owns.
    pub async fn folder(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Folder> {
        match self.folders.get(id).await? {
            Some(folder) if folder.owner_id == ctx.user_id => Ok(folder),
            _ => Err(AppError::not_found("Folder not found")),
        }
    }

    /// Resolve a file the acting user owns.
    pub async fn file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<File> {
        match self.files.get(id).await? {
            Some(file) if file.owner_id == ctx.user_id => Ok(file),
            _ => Err(AppError::not_found("File not found")),
        }
    }

    /// Resolve a note the acting user owns.
    pub async fn note(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Note> {
        match self.notes.get(id).await? {
            Some(note) if note.owner_id == ctx.user_id => Ok(note),
            _ => Err(AppError::not_found("Note not found")),
        }
    }

    /// Resolve any entity by its (id, kind) reference.
    pub async fn entity(&self, ctx: &RequestContext, entry: EntityRef) -> AppResult<Entity> {
        match entry.kind {
            EntityKind::Image | EntityKind::Pdf => {
                self.file(ctx, entry.id).await.map(Entity::File)
            }
            EntityKind::Folder => self.folder(ctx, entry.id).await.map(Entity::Folder),
            EntityKind::Note => self.note(ctx, entry.id).await.map(Entity::Note),
        }
    }
}
