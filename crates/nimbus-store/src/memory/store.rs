//! In-memory entity store backed by dashmap.
//!
//! Used by unit tests across the workspace; behaviourally equivalent to
//! the PostgreSQL backend for everything the store traits promise.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use nimbus_core::result::AppResult;
use nimbus_entity::{EntityFilter, File, Folder, Note};

use crate::traits::{FileStore, FolderStore, NoteStore};

/// A single in-memory store serving all three entity kinds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    folders: DashMap<Uuid, Folder>,
    files: DashMap<Uuid, File>,
    notes: DashMap<Uuid, Note>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_common(
    filter: &EntityFilter,
    owner_id: Uuid,
    parent: Option<Uuid>,
    favourite: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    id: Uuid,
) -> bool {
    owner_id == filter.owner_id
        && filter.parent.matches(parent)
        && filter.favourite.is_none_or(|want| want == favourite)
        && filter.created_in.is_none_or(|range| range.contains(created_at))
        && filter.ids.as_ref().is_none_or(|ids| ids.contains(&id))
}

/// Newest first, id as a tiebreaker so test output is deterministic.
fn sort_newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, Uuid)) {
    items.sort_by(|a, b| {
        let (at_a, id_a) = key(a);
        let (at_b, id_b) = key(b);
        at_b.cmp(&at_a).then(id_a.cmp(&id_b))
    });
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.folders.get(&id).map(|e| e.clone()))
    }

    async fn find(&self, filter: &EntityFilter) -> AppResult<Vec<Folder>> {
        let mut out: Vec<Folder> = self
            .folders
            .iter()
            .filter(|e| {
                matches_common(filter, e.owner_id, e.parent_id, e.favourite, e.created_at, e.id)
            })
            .map(|e| e.clone())
            .collect();
        sort_newest_first(&mut out, |f| (f.created_at, f.id));
        Ok(out)
    }

    async fn find_recent(&self, owner_id: Uuid, limit: usize) -> AppResult<Vec<Folder>> {
        let mut out = FolderStore::find(self, &EntityFilter::owned_by(owner_id)).await?;
        out.truncate(limit);
        Ok(out)
    }

    async fn save(&self, folder: &Folder) -> AppResult<Folder> {
        self.folders.insert(folder.id, folder.clone());
        Ok(folder.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.folders.remove(&id).is_some())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        Ok(ids
            .iter()
            .filter(|id| self.folders.remove(id).is_some())
            .count() as u64)
    }

    async fn set_favourite(&self, id: Uuid, owner_id: Uuid, favourite: bool) -> AppResult<bool> {
        match self.folders.get_mut(&id) {
            Some(mut e) if e.owner_id == owner_id => {
                e.favourite = favourite;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<File>> {
        Ok(self.files.get(&id).map(|e| e.clone()))
    }

    async fn find(&self, filter: &EntityFilter) -> AppResult<Vec<File>> {
        let mut out: Vec<File> = self
            .files
            .iter()
            .filter(|e| {
                matches_common(filter, e.owner_id, e.folder_id, e.favourite, e.created_at, e.id)
                    && filter.file_kind.is_none_or(|kind| kind == e.kind)
            })
            .map(|e| e.clone())
            .collect();
        sort_newest_first(&mut out, |f| (f.created_at, f.id));
        Ok(out)
    }

    async fn find_recent(&self, owner_id: Uuid, limit: usize) -> AppResult<Vec<File>> {
        let mut out = FileStore::find(self, &EntityFilter::owned_by(owner_id)).await?;
        out.truncate(limit);
        Ok(out)
    }

    async fn save(&self, file: &File) -> AppResult<File> {
        self.files.insert(file.id, file.clone());
        Ok(file.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.files.remove(&id).is_some())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        Ok(ids
            .iter()
            .filter(|id| self.files.remove(id).is_some())
            .count() as u64)
    }

    async fn set_favourite(&self, id: Uuid, owner_id: Uuid, favourite: bool) -> AppResult<bool> {
        match self.files.get_mut(&id) {
            Some(mut e) if e.owner_id == owner_id => {
                e.favourite = favourite;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<Note>> {
        Ok(self.notes.get(&id).map(|e| e.clone()))
    }

    async fn find(&self, filter: &EntityFilter) -> AppResult<Vec<Note>> {
        let mut out: Vec<Note> = self
            .notes
            .iter()
            .filter(|e| {
                matches_common(filter, e.owner_id, e.folder_id, e.favourite, e.created_at, e.id)
            })
            .map(|e| e.clone())
            .collect();
        sort_newest_first(&mut out, |n| (n.created_at, n.id));
        Ok(out)
    }

    async fn save(&self, note: &Note) -> AppResult<Note> {
        self.notes.insert(note.id, note.clone());
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.notes.remove(&id).is_some())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        Ok(ids
            .iter()
            .filter(|id| self.notes.remove(id).is_some())
            .count() as u64)
    }

    async fn delete_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<u64> {
        Ok(ids
            .iter()
            .filter(|id| {
                let owned = self
                    .notes
                    .get(id)
                    .is_some_and(|n| n.owner_id == owner_id);
                owned && self.notes.remove(id).is_some()
            })
            .count() as u64)
    }

    async fn set_favourite(&self, id: Uuid, owner_id: Uuid, favourite: bool) -> AppResult<bool> {
        match self.notes.get_mut(&id) {
            Some(mut e) if e.owner_id == owner_id => {
                e.favourite = favourite;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
