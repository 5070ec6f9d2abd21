//! Note operations.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_entity::{EntityFilter, Note};
use nimbus_store::traits::NoteStore;

use crate::context::RequestContext;
use crate::guard::OwnershipGuard;

/// Manages note CRUD.
#[derive(Debug, Clone)]
pub struct NoteService {
    notes: Arc<dyn NoteStore>,
    guard: OwnershipGuard,
}

impl NoteService {
    /// Creates a new note service.
    pub fn new(notes: Arc<dyn NoteStore>, guard: OwnershipGuard) -> Self {
        Self { notes, guard }
    }

    /// Creates a note, optionally inside an owned folder.
    pub async fn create_note(
        &self,
        ctx: &RequestContext,
        title: &str,
        content: &str,
        folder_id: Option<Uuid>,
    ) -> AppResult<Note> {
        if title.trim().is_empty() {
            return Err(AppError::validation("Note title cannot be empty"));
        }
        if content.trim().is_empty() {
            return Err(AppError::validation("Note content cannot be empty"));
        }
        if let Some(folder_id) = folder_id {
            self.guard.folder(ctx, folder_id).await?;
        }

        let note = self
            .notes
            .save(&Note::new(ctx.user_id, title, content, folder_id))
            .await?;

        info!(user_id = %ctx.user_id, note_id = %note.id, "Note created");
        Ok(note)
    }

    /// Replaces a note's title and content.
    ///
    /// Unlike creation, an edit may clear the content; only the title must
    /// stay non-empty.
    pub async fn edit_note(
        &self,
        ctx: &RequestContext,
        note_id: Uuid,
        title: &str,
        content: &str,
    ) -> AppResult<Note> {
        if title.trim().is_empty() {
            return Err(AppError::validation("Note title cannot be empty"));
        }

        let mut note = self.guard.note(ctx, note_id).await?;
        note.title = title.to_string();
        note.content = content.to_string();
        note.updated_at = Utc::now();
        let note = self.notes.save(&note).await?;

        info!(user_id = %ctx.user_id, note_id = %note_id, "Note edited");
        Ok(note)
    }

    /// Renames a note without touching its content.
    pub async fn rename_title(
        &self,
        ctx: &RequestContext,
        note_id: Uuid,
        new_title: &str,
    ) -> AppResult<Note> {
        if new_title.trim().is_empty() {
            return Err(AppError::validation("Note title cannot be empty"));
        }

        let mut note = self.guard.note(ctx, note_id).await?;
        note.title = new_title.to_string();
        note.updated_at = Utc::now();
        let note = self.notes.save(&note).await?;

        info!(user_id = %ctx.user_id, note_id = %note_id, "Note renamed");
        Ok(note)
    }

    /// Fetches one owned note.
    pub async fn get_note(&self, ctx: &RequestContext, note_id: Uuid) -> AppResult<Note> {
        self.guard.note(ctx, note_id).await
    }

    /// Every note the user owns.
    pub async fn list_notes(&self, ctx: &RequestContext) -> AppResult<Vec<Note>> {
        self.notes.find(&EntityFilter::owned_by(ctx.user_id)).await
    }

    /// Deletes a batch of notes, silently skipping unknown or foreign ids,
    /// and returns the count actually removed.
    pub async fn delete_notes(&self, ctx: &RequestContext, note_ids: &[Uuid]) -> AppResult<u64> {
        if note_ids.is_empty() {
            return Err(AppError::validation("No notes given"));
        }

        let removed = self.notes.delete_owned(note_ids, ctx.user_id).await?;
        info!(user_id = %ctx.user_id, removed, "Notes deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use nimbus_core::error::ErrorKind;
    use nimbus_entity::Folder;
    use nimbus_store::traits::{FolderStore, NoteStore};

    use super::*;
    use crate::testutil::{TestEnv, ctx_for};

    fn service(env: &TestEnv) -> NoteService {
        NoteService::new(env.notes(), env.guard())
    }

    #[tokio::test]
    async fn create_requires_title_and_content() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let svc = service(&env);

        let err = svc.create_note(&ctx, "", "body", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let err = svc.create_note(&ctx, "title", " ", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let note = svc.create_note(&ctx, "title", "body", None).await.unwrap();
        assert_eq!(note.title, "title");
    }

    #[tokio::test]
    async fn create_guards_folder() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let theirs = Folder::new(Uuid::new_v4(), "theirs", None);
        FolderStore::save(env.store.as_ref(), &theirs).await.unwrap();

        let err = service(&env)
            .create_note(&ctx, "t", "c", Some(theirs.id))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn edit_allows_clearing_content_and_bumps_updated_at() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let svc = service(&env);

        let note = svc.create_note(&ctx, "t", "original", None).await.unwrap();
        let edited = svc.edit_note(&ctx, note.id, "t2", "").await.unwrap();
        assert_eq!(edited.title, "t2");
        assert_eq!(edited.content, "");
        assert!(edited.updated_at >= note.updated_at);

        let err = svc.edit_note(&ctx, note.id, "", "x").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn rename_keeps_content() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let svc = service(&env);

        let note = svc.create_note(&ctx, "old", "body", None).await.unwrap();
        let renamed = svc.rename_title(&ctx, note.id, "new").await.unwrap();
        assert_eq!(renamed.title, "new");
        assert_eq!(renamed.content, "body");
    }

    #[tokio::test]
    async fn delete_is_silently_partial() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);
        let svc = service(&env);

        let mine = svc.create_note(&ctx, "mine", "c", None).await.unwrap();
        let theirs = Note::new(Uuid::new_v4(), "theirs", "c", None);
        NoteStore::save(env.store.as_ref(), &theirs).await.unwrap();

        let removed = svc
            .delete_notes(&ctx, &[mine.id, theirs.id, Uuid::new_v4()])
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert!(NoteStore::get(env.store.as_ref(), theirs.id)
            .await
            .unwrap()
            .is_some());

        let err = svc.delete_notes(&ctx, &[]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn get_and_list_are_owner_scoped() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let svc = service(&env);

        let note = svc.create_note(&ctx, "t", "c", None).await.unwrap();
        assert_eq!(svc.get_note(&ctx, note.id).await.unwrap().id, note.id);
        assert_eq!(svc.list_notes(&ctx).await.unwrap().len(), 1);

        let stranger = ctx_for(Uuid::new_v4());
        let err = svc.get_note(&stranger, note.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(svc.list_notes(&stranger).await.unwrap().is_empty());
    }
}
