//! Duplication of files, notes, and whole folder subtrees.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_core::traits::blob::BlobStore;
use nimbus_entity::{Entity, EntityKind, EntityRef, File, Folder, Note};
use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

use crate::context::RequestContext;
use crate::folder::tree::TreeWalker;
use crate::guard::OwnershipGuard;

/// Derives a copy's name by splitting at the first dot, so multi-extension
/// names keep their full suffix: `"a.tar.gz"` becomes `"a-copy.tar.gz"`.
fn copy_name(name: &str) -> String {
    match name.split_once('.') {
        Some((stem, ext)) => format!("{stem}-copy.{ext}"),
        None => format!("{name}-copy"),
    }
}

/// Duplicates entities of any kind.
///
/// Every copy gets its own identity: fresh ids, fresh timestamps, and for
/// files a physically copied blob, so source and copy never share bytes.
#[derive(Debug, Clone)]
pub struct DuplicateService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    notes: Arc<dyn NoteStore>,
    blobs: Arc<dyn BlobStore>,
    guard: OwnershipGuard,
    walker: TreeWalker,
}

impl DuplicateService {
    /// Creates a new duplicate service.
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

    /// Duplicates one entity, dispatching on its kind.
    pub async fn duplicate(&self, ctx: &RequestContext, entry: EntityRef) -> AppResult<Entity> {
        let copy = match entry.kind {
            EntityKind::Image | EntityKind::Pdf => {
                Entity::File(self.duplicate_file(ctx, entry.id).await?)
            }
            EntityKind::Folder => Entity::Folder(self.duplicate_folder(ctx, entry.id).await?),
            EntityKind::Note => Entity::Note(self.duplicate_note(ctx, entry.id).await?),
        };

        info!(
            user_id = %ctx.user_id,
            source_id = %entry.id,
            copy_id = %copy.id(),
            kind = %entry.kind,
            "Entity duplicated"
        );
        Ok(copy)
    }

    async fn duplicate_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let source = self.guard.file(ctx, file_id).await?;
        let name = copy_name(&source.name);
        let locator = self.blobs.copy(&source.locator, &name).await?;
        self.files
            .save(&File::new(
                ctx.user_id,
                name,
                source.kind,
                source.folder_id,
                source.size_bytes,
                locator,
            ))
            .await
    }

    async fn duplicate_note(&self, ctx: &RequestContext, note_id: Uuid) -> AppResult<Note> {
        let source = self.guard.note(ctx, note_id).await?;
        self.notes
            .save(&Note::new(
                ctx.user_id,
                format!("{}-copy", source.title),
                source.content.clone(),
                source.folder_id,
            ))
            .await
    }

    /// Duplicates a folder with its entire subtree.
    ///
    /// The copied root is renamed and loses its favourite flag; descendants
    /// keep both. Parent links are remapped onto the fresh folder ids, and
    /// every descendant file gets its own blob copy.
    async fn duplicate_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        let source = self.guard.folder(ctx, folder_id).await?;
        let subtree = self.walker.collect(&source).await?;

        // BFS order guarantees a folder's parent is remapped before the
        // folder itself comes up.
        let mut id_map: HashMap<Uuid, Uuid> = HashMap::new();
        let mut new_root = None;
        for folder in &subtree.folders {
            let copy = if folder.id == source.id {
                Folder::new(
                    ctx.user_id,
                    format!("{}-copy", folder.name),
                    folder.parent_id,
                )
            } else {
                let parent_id = folder.parent_id.and_then(|p| id_map.get(&p).copied());
                let mut copy = Folder::new(ctx.user_id, folder.name.clone(), parent_id);
                copy.favourite = folder.favourite;
                copy
            };
            let saved = self.folders.save(&copy).await?;
            id_map.insert(folder.id, saved.id);
            if folder.id == source.id {
                new_root = Some(saved);
            }
        }

        for file in &subtree.files {
            let locator = self.blobs.copy(&file.locator, &file.name).await?;
            let mut copy = File::new(
                ctx.user_id,
                file.name.clone(),
                file.kind,
                file.folder_id.and_then(|p| id_map.get(&p).copied()),
                file.size_bytes,
                locator,
            );
            copy.favourite = file.favourite;
            self.files.save(&copy).await?;
        }

        for note in &subtree.notes {
            let mut copy = Note::new(
                ctx.user_id,
                note.title.clone(),
                note.content.clone(),
                note.folder_id.and_then(|p| id_map.get(&p).copied()),
            );
            copy.favourite = note.favourite;
            self.notes.save(&copy).await?;
        }

        new_root.ok_or_else(|| AppError::internal("Subtree walk returned no root"))
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use nimbus_core::error::ErrorKind;
    use nimbus_entity::{EntityFilter, FileKind, ParentScope};
    use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

    use super::*;
    use crate::testutil::{TestEnv, ctx_for};

    fn service(env: &TestEnv) -> DuplicateService {
        DuplicateService::new(env.folders(), env.files(), env.notes(), env.blobs.clone())
    }

    fn entry(id: Uuid, kind: EntityKind) -> EntityRef {
        EntityRef { id, kind }
    }

    #[test]
    fn copy_name_splits_at_first_dot() {
        assert_eq!(copy_name("report.pdf"), "report-copy.pdf");
        assert_eq!(copy_name("a.tar.gz"), "a-copy.tar.gz");
        assert_eq!(copy_name("noext"), "noext-copy");
    }

    #[tokio::test]
    async fn file_copy_gets_fresh_blob_with_same_bytes() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);

        let locator = env
            .blobs
            .store(Bytes::from("pages"), "report.pdf")
            .await
            .unwrap();
        let mut source = File::new(owner, "report.pdf", FileKind::Pdf, None, 5, &locator);
        source.favourite = true;
        FileStore::save(env.store.as_ref(), &source).await.unwrap();

        let copy = service(&env)
            .duplicate(&ctx, entry(source.id, EntityKind::Pdf))
            .await
            .unwrap();
        let Entity::File(copy) = copy else {
            panic!("expected a file");
        };

        assert_eq!(copy.name, "report-copy.pdf");
        assert_eq!(copy.kind, FileKind::Pdf);
        assert_eq!(copy.folder_id, None);
        assert!(!copy.favourite);
        assert_ne!(copy.locator, source.locator);
        assert_eq!(
            env.blobs.read(&copy.locator).await.unwrap(),
            Bytes::from("pages")
        );

        // Deleting the source blob leaves the copy readable.
        env.blobs.delete(&source.locator).await.unwrap();
        assert!(env.blobs.exists(&copy.locator).await.unwrap());
    }

    #[tokio::test]
    async fn note_copy_keeps_content() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);

        let mut source = Note::new(owner, "plan", "step one", None);
        source.favourite = true;
        NoteStore::save(env.store.as_ref(), &source).await.unwrap();

        let copy = service(&env)
            .duplicate(&ctx, entry(source.id, EntityKind::Note))
            .await
            .unwrap();
        let Entity::Note(copy) = copy else {
            panic!("expected a note");
        };
        assert_eq!(copy.title, "plan-copy");
        assert_eq!(copy.content, "step one");
        assert!(!copy.favourite);
    }

    #[tokio::test]
    async fn folder_copy_recreates_whole_subtree() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);

        let mut root = Folder::new(owner, "project", None);
        root.favourite = true;
        let mut child = Folder::new(owner, "assets", Some(root.id));
        child.favourite = true;
        FolderStore::save(env.store.as_ref(), &root).await.unwrap();
        FolderStore::save(env.store.as_ref(), &child).await.unwrap();

        let locator = env
            .blobs
            .store(Bytes::from("img"), "logo.png")
            .await
            .unwrap();
        let file = File::new(owner, "logo.png", FileKind::Image, Some(child.id), 3, &locator);
        FileStore::save(env.store.as_ref(), &file).await.unwrap();
        let note = Note::new(owner, "readme", "text", Some(root.id));
        NoteStore::save(env.store.as_ref(), &note).await.unwrap();

        let copy = service(&env)
            .duplicate(&ctx, entry(root.id, EntityKind::Folder))
            .await
            .unwrap();
        let Entity::Folder(copy_root) = copy else {
            panic!("expected a folder");
        };

        assert_eq!(copy_root.name, "project-copy");
        assert_eq!(copy_root.parent_id, None);
        assert!(!copy_root.favourite);
        assert_ne!(copy_root.id, root.id);

        let copied_children = FolderStore::find(
            env.store.as_ref(),
            &EntityFilter::owned_by(owner).in_scope(ParentScope::In(copy_root.id)),
        )
        .await
        .unwrap();
        assert_eq!(copied_children.len(), 1);
        let copied_child = &copied_children[0];
        assert_eq!(copied_child.name, "assets");
        assert!(copied_child.favourite);

        let copied_files = FileStore::find(
            env.store.as_ref(),
            &EntityFilter::owned_by(owner).in_scope(ParentScope::In(copied_child.id)),
        )
        .await
        .unwrap();
        assert_eq!(copied_files.len(), 1);
        assert_eq!(copied_files[0].name, "logo.png");
        assert_ne!(copied_files[0].locator, file.locator);

        let copied_notes = NoteStore::find(
            env.store.as_ref(),
            &EntityFilter::owned_by(owner).in_scope(ParentScope::In(copy_root.id)),
        )
        .await
        .unwrap();
        assert_eq!(copied_notes.len(), 1);
        assert_eq!(copied_notes[0].title, "readme");

        // Original untouched.
        assert!(FolderStore::get(env.store.as_ref(), child.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn foreign_source_is_not_found() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());

        let theirs = Note::new(Uuid::new_v4(), "t", "c", None);
        NoteStore::save(env.store.as_ref(), &theirs).await.unwrap();

        let err = service(&env)
            .duplicate(&ctx, entry(theirs.id, EntityKind::Note))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
