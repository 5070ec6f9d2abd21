//! Folder operations: create, rename, list contents, recursive delete.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_core::traits::blob::BlobStore;
use nimbus_entity::{EntityFilter, File, Folder, Note, ParentScope};
use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

use crate::context::RequestContext;
use crate::folder::tree::TreeWalker;
use crate::guard::OwnershipGuard;

/// The direct children of one folder level.
#[derive(Debug, Clone, Serialize)]
pub struct FolderContents {
    pub folders: Vec<Folder>,
    pub files: Vec<File>,
    pub notes: Vec<Note>,
}

/// Row counts removed by a recursive folder deletion.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FolderDeletion {
    pub folders: u64,
    pub files: u64,
    pub notes: u64,
}

/// Manages folder CRUD and recursive deletion.
#[derive(Debug, Clone)]
pub struct FolderService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    notes: Arc<dyn NoteStore>,
    blobs: Arc<dyn BlobStore>,
    guard: OwnershipGuard,
    walker: TreeWalker,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        notes: Arc<dyn NoteStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let guard = OwnershipGuard::new(folders.clone(), files.clone(), notes.clone());
        let walker = TreeWalker::new(folders.clone(), files.clone(), notes.clone());
        Self {
            folders,
            files,
            notes,
            blobs,
            guard,
            walker,
        }
    }

    /// Creates a folder, optionally inside an existing one.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if let Some(parent_id) = parent_id {
            self.guard.folder(ctx, parent_id).await?;
        }

        let folder = self
            .folders
            .save(&Folder::new(ctx.user_id, name, parent_id))
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            "Folder created"
        );
        Ok(folder)
    }

    /// Renames an owned folder.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> AppResult<Folder> {
        if new_name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let mut folder = self.guard.folder(ctx, folder_id).await?;
        folder.name = new_name.to_string();
        let folder = self.folders.save(&folder).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            "Folder renamed"
        );
        Ok(folder)
    }

    /// Lists the direct children of a folder, or of the root level.
    pub async fn list_contents(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> AppResult<FolderContents> {
        if let Some(folder_id) = folder_id {
            self.guard.folder(ctx, folder_id).await?;
        }

        let scope = EntityFilter::owned_by(ctx.user_id).in_scope(ParentScope::of(folder_id));
        Ok(FolderContents {
            folders: self.folders.find(&scope).await?,
            files: self.files.find(&scope).await?,
            notes: self.notes.find(&scope).await?,
        })
    }

    /// Deletes folders recursively, including every file, note, and
    /// sub-folder below them, and releases the blobs of removed files.
    ///
    /// Every id is resolved through the guard before anything is touched,
    /// so one bad id fails the whole batch. Blob release tolerates blobs
    /// that are already gone; a real storage failure aborts the batch with
    /// whatever was already removed staying removed.
    pub async fn delete_folders(
        &self,
        ctx: &RequestContext,
        folder_ids: &[Uuid],
    ) -> AppResult<FolderDeletion> {
        if folder_ids.is_empty() {
            return Err(AppError::validation("No folders given"));
        }

        let mut roots = Vec::with_capacity(folder_ids.len());
        for &id in folder_ids {
            roots.push(self.guard.folder(ctx, id).await?);
        }

        // Overlapping roots (a parent and its own descendant in one batch)
        // must not double-count, so collection dedupes by id.
        let mut seen = HashSet::new();
        let mut folder_ids = Vec::new();
        let mut note_ids = Vec::new();
        let mut doomed_files: Vec<File> = Vec::new();
        for root in &roots {
            let subtree = self.walker.collect(root).await?;
            for folder in subtree.folders {
                if seen.insert(folder.id) {
                    folder_ids.push(folder.id);
                }
            }
            for note in subtree.notes {
                if seen.insert(note.id) {
                    note_ids.push(note.id);
                }
            }
            for file in subtree.files {
                if seen.insert(file.id) {
                    doomed_files.push(file);
                }
            }
        }

        for file in &doomed_files {
            self.blobs.delete(&file.locator).await?;
        }

        let file_ids: Vec<Uuid> = doomed_files.iter().map(|f| f.id).collect();
        let notes = self.notes.delete_many(&note_ids).await?;
        let files = self.files.delete_many(&file_ids).await?;
        let folders = self.folders.delete_many(&folder_ids).await?;

        info!(
            user_id = %ctx.user_id,
            folders,
            files,
            notes,
            "Folders deleted"
        );
        Ok(FolderDeletion {
            folders,
            files,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use nimbus_core::error::ErrorKind;
    use nimbus_entity::FileKind;
    use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

    use super::*;
    use crate::testutil::{TestEnv, ctx_for};

    fn service(env: &TestEnv) -> FolderService {
        FolderService::new(env.folders(), env.files(), env.notes(), env.blobs.clone())
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let err = service(&env)
            .create_folder(&ctx, "   ", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn create_rejects_foreign_parent() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let theirs = Folder::new(Uuid::new_v4(), "theirs", None);
        FolderStore::save(env.store.as_ref(), &theirs).await.unwrap();

        let err = service(&env)
            .create_folder(&ctx, "mine", Some(theirs.id))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn rename_overwrites_name() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let svc = service(&env);

        let folder = svc.create_folder(&ctx, "drafts", None).await.unwrap();
        let renamed = svc
            .rename_folder(&ctx, folder.id, "final")
            .await
            .unwrap();
        assert_eq!(renamed.name, "final");
        assert_eq!(renamed.id, folder.id);
    }

    #[tokio::test]
    async fn list_contents_scopes_by_level() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);
        let svc = service(&env);

        let top = svc.create_folder(&ctx, "top", None).await.unwrap();
        svc.create_folder(&ctx, "inner", Some(top.id)).await.unwrap();
        let note = Note::new(owner, "n", "c", Some(top.id));
        NoteStore::save(env.store.as_ref(), &note).await.unwrap();

        let root = svc.list_contents(&ctx, None).await.unwrap();
        assert_eq!(root.folders.len(), 1);
        assert!(root.notes.is_empty());

        let inside = svc.list_contents(&ctx, Some(top.id)).await.unwrap();
        assert_eq!(inside.folders.len(), 1);
        assert_eq!(inside.notes.len(), 1);
    }

    #[tokio::test]
    async fn delete_cascades_through_subtree() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);
        let svc = service(&env);

        let root = svc.create_folder(&ctx, "root", None).await.unwrap();
        let child = svc.create_folder(&ctx, "child", Some(root.id)).await.unwrap();

        let locator = env
            .blobs
            .store(Bytes::from("bytes"), "deep.pdf")
            .await
            .unwrap();
        let file = File::new(owner, "deep.pdf", FileKind::Pdf, Some(child.id), 5, &locator);
        FileStore::save(env.store.as_ref(), &file).await.unwrap();
        let note = Note::new(owner, "memo", "text", Some(root.id));
        NoteStore::save(env.store.as_ref(), &note).await.unwrap();

        let outcome = svc.delete_folders(&ctx, &[root.id]).await.unwrap();
        assert_eq!(outcome.folders, 2);
        assert_eq!(outcome.files, 1);
        assert_eq!(outcome.notes, 1);

        assert!(FolderStore::get(env.store.as_ref(), child.id)
            .await
            .unwrap()
            .is_none());
        assert!(FileStore::get(env.store.as_ref(), file.id)
            .await
            .unwrap()
            .is_none());
        assert!(!env.blobs.exists(&locator).await.unwrap());
    }

    #[tokio::test]
    async fn delete_aborts_on_foreign_id_without_mutation() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);
        let svc = service(&env);

        let mine = svc.create_folder(&ctx, "mine", None).await.unwrap();
        let theirs = Folder::new(Uuid::new_v4(), "theirs", None);
        FolderStore::save(env.store.as_ref(), &theirs).await.unwrap();

        let err = svc
            .delete_folders(&ctx, &[mine.id, theirs.id])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(FolderStore::get(env.store.as_ref(), mine.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn delete_rejects_empty_batch() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let err = service(&env).delete_folders(&ctx, &[]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn delete_tolerates_missing_blob() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);
        let svc = service(&env);

        let root = svc.create_folder(&ctx, "root", None).await.unwrap();
        let file = File::new(owner, "gone.pdf", FileKind::Pdf, Some(root.id), 5, "never-stored");
        FileStore::save(env.store.as_ref(), &file).await.unwrap();

        let outcome = svc.delete_folders(&ctx, &[root.id]).await.unwrap();
        assert_eq!(outcome.files, 1);
    }

    #[tokio::test]
    async fn overlapping_roots_count_once() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);
        let svc = service(&env);

        let root = svc.create_folder(&ctx, "root", None).await.unwrap();
        let child = svc.create_folder(&ctx, "child", Some(root.id)).await.unwrap();

        let outcome = svc
            .delete_folders(&ctx, &[root.id, child.id])
            .await
            .unwrap();
        assert_eq!(outcome.folders, 2);
    }
}
