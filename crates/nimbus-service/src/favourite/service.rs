//! Favourite operations.

use std::sync::Arc;

use tracing::info;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_entity::{Entity, EntityFilter, EntityKind, EntityRef};
use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

use crate::context::RequestContext;
use crate::guard::OwnershipGuard;
use crate::listing::service::newest_first;

/// Manages the favourite flag across files, folders, and notes.
#[derive(Debug, Clone)]
pub struct FavouriteService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    notes: Arc<dyn NoteStore>,
    guard: OwnershipGuard,
}

impl FavouriteService {
    /// Creates a new favourite service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        notes: Arc<dyn NoteStore>,
    ) -> Self {
        let guard = OwnershipGuard::new(folders.clone(), files.clone(), notes.clone());
        Self {
            folders,
            files,
            notes,
            guard,
        }
    }

    /// Flips the favourite flag on a batch of entities and returns them in
    /// their updated state.
    ///
    /// Every entry resolves through the guard before any flag changes, so
    /// one bad entry fails the batch with nothing flipped.
    pub async fn toggle_multiple(
        &self,
        ctx: &RequestContext,
        entries: &[EntityRef],
    ) -> AppResult<Vec<Entity>> {
        if entries.is_empty() {
            return Err(AppError::validation("No entities given"));
        }

        let mut resolved = Vec::with_capacity(entries.len());
        for &entry in entries {
            resolved.push(self.guard.entity(ctx, entry).await?);
        }

        let mut updated = Vec::with_capacity(resolved.len());
        for entity in resolved {
            let flipped = match entity {
                Entity::File(mut file) => {
                    file.favourite = !file.favourite;
                    Entity::File(self.files.save(&file).await?)
                }
                Entity::Folder(mut folder) => {
                    folder.favourite = !folder.favourite;
                    Entity::Folder(self.folders.save(&folder).await?)
                }
                Entity::Note(mut note) => {
                    note.favourite = !note.favourite;
                    Entity::Note(self.notes.save(&note).await?)
                }
            };
            updated.push(flipped);
        }

        info!(
            user_id = %ctx.user_id,
            count = updated.len(),
            "Favourites toggled"
        );
        Ok(updated)
    }

    /// Unconditionally clears the favourite flag on a batch of entities.
    ///
    /// Idempotent: unknown and foreign ids are skipped silently, and
    /// clearing an already-clear flag is not an error. Returns how many
    /// entities were actually updated.
    pub async fn unfavourite_multiple(
        &self,
        ctx: &RequestContext,
        entries: &[EntityRef],
    ) -> AppResult<u64> {
        if entries.is_empty() {
            return Err(AppError::validation("No entities given"));
        }

        let mut updated = 0u64;
        for &entry in entries {
            let touched = match entry.kind {
                EntityKind::Image | EntityKind::Pdf => {
                    self.files.set_favourite(entry.id, ctx.user_id, false).await?
                }
                EntityKind::Folder => {
                    self.folders
                        .set_favourite(entry.id, ctx.user_id, false)
                        .await?
                }
                EntityKind::Note => {
                    self.notes.set_favourite(entry.id, ctx.user_id, false).await?
                }
            };
            if touched {
                updated += 1;
            }
        }

        info!(user_id = %ctx.user_id, updated, "Favourites cleared");
        Ok(updated)
    }

    /// Every favourited entity the user owns, newest first.
    pub async fn list_favourites(&self, ctx: &RequestContext) -> AppResult<Vec<Entity>> {
        let filter = EntityFilter::owned_by(ctx.user_id).favourite(true);
        let mut out: Vec<Entity> = self
            .files
            .find(&filter)
            .await?
            .into_iter()
            .map(Entity::File)
            .chain(
                self.folders
                    .find(&filter)
                    .await?
                    .into_iter()
                    .map(Entity::Folder),
            )
            .chain(
                self.notes
                    .find(&filter)
                    .await?
                    .into_iter()
                    .map(Entity::Note),
            )
            .collect();
        newest_first(&mut out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use nimbus_core::error::ErrorKind;
    use nimbus_entity::{File, FileKind, Folder, Note};
    use nimbus_store::traits::{FileStore, FolderStore, NoteStore};
    use uuid::Uuid;

    use super::*;
    use crate::testutil::{TestEnv, ctx_for};

    fn service(env: &TestEnv) -> FavouriteService {
        FavouriteService::new(env.folders(), env.files(), env.notes())
    }

    #[tokio::test]
    async fn toggle_flips_mixed_kinds() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);

        let file = File::new(owner, "a.png", FileKind::Image, None, 1, "l");
        let mut note = Note::new(owner, "n", "c", None);
        note.favourite = true;
        FileStore::save(env.store.as_ref(), &file).await.unwrap();
        NoteStore::save(env.store.as_ref(), &note).await.unwrap();

        let updated = service(&env)
            .toggle_multiple(
                &ctx,
                &[
                    EntityRef {
                        id: file.id,
                        kind: EntityKind::Image,
                    },
                    EntityRef {
                        id: note.id,
                        kind: EntityKind::Note,
                    },
                ],
            )
            .await
            .unwrap();

        assert_eq!(updated.len(), 2);
        assert!(updated.iter().any(|e| e.id() == file.id && e.favourite()));
        assert!(updated.iter().any(|e| e.id() == note.id && !e.favourite()));
    }

    #[tokio::test]
    async fn toggle_validates_whole_batch_first() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);

        let mine = Folder::new(owner, "mine", None);
        FolderStore::save(env.store.as_ref(), &mine).await.unwrap();

        let err = service(&env)
            .toggle_multiple(
                &ctx,
                &[
                    EntityRef {
                        id: mine.id,
                        kind: EntityKind::Folder,
                    },
                    EntityRef {
                        id: Uuid::new_v4(),
                        kind: EntityKind::Folder,
                    },
                ],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let still = FolderStore::get(env.store.as_ref(), mine.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!still.favourite);
    }

    #[tokio::test]
    async fn toggle_rejects_empty_batch() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let err = service(&env).toggle_multiple(&ctx, &[]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn unfavourite_is_idempotent_and_silent() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);

        let mut folder = Folder::new(owner, "d", None);
        folder.favourite = true;
        FolderStore::save(env.store.as_ref(), &folder).await.unwrap();

        let entries = [
            EntityRef {
                id: folder.id,
                kind: EntityKind::Folder,
            },
            EntityRef {
                id: Uuid::new_v4(),
                kind: EntityKind::Pdf,
            },
        ];

        let svc = service(&env);
        let first = svc.unfavourite_multiple(&ctx, &entries).await.unwrap();
        assert_eq!(first, 1);

        // Second run still succeeds; the flag stays cleared.
        let second = svc.unfavourite_multiple(&ctx, &entries).await.unwrap();
        assert_eq!(second, 1);
        let got = FolderStore::get(env.store.as_ref(), folder.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!got.favourite);
    }

    #[tokio::test]
    async fn list_returns_only_favourites_newest_first() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);

        let mut starred = File::new(owner, "a.pdf", FileKind::Pdf, None, 1, "l");
        starred.favourite = true;
        let plain = File::new(owner, "b.pdf", FileKind::Pdf, None, 1, "l2");
        let mut note = Note::new(owner, "n", "c", None);
        note.favourite = true;
        FileStore::save(env.store.as_ref(), &starred).await.unwrap();
        FileStore::save(env.store.as_ref(), &plain).await.unwrap();
        NoteStore::save(env.store.as_ref(), &note).await.unwrap();

        let favourites = service(&env).list_favourites(&ctx).await.unwrap();
        assert_eq!(favourites.len(), 2);
        assert!(favourites.iter().all(|e| e.favourite()));
        assert!(
            favourites
                .windows(2)
                .all(|w| w[0].created_at() >= w[1].created_at())
        );
    }
}
