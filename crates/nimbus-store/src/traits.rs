//! Entity store traits.
//!
//! One trait per entity kind, each with the same contract: owner-scoped
//! filterable reads, upsert-style saves, and id-addressed deletes where
//! "already gone" is reported as `false`, never as an error.

use async_trait::async_trait;
use uuid::Uuid;

use nimbus_core::result::AppResult;
use nimbus_entity::{EntityFilter, File, Folder, Note};

/// Persistence for [`Folder`] records.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a folder by id regardless of owner.
    async fn get(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// Find folders matching the filter (`file_kind` is ignored).
    async fn find(&self, filter: &EntityFilter) -> AppResult<Vec<Folder>>;

    /// The `limit` most recently created folders of an owner, newest first.
    async fn find_recent(&self, owner_id: Uuid, limit: usize) -> AppResult<Vec<Folder>>;

    /// Insert or replace a folder by id, returning the stored record.
    async fn save(&self, folder: &Folder) -> AppResult<Folder>;

    /// Delete one folder. Returns `false` if it was already gone.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Delete a set of folders by id, returning the count removed.
    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64>;

    /// Directly set the favourite flag of an owned folder. Returns whether
    /// a matching row existed.
    async fn set_favourite(&self, id: Uuid, owner_id: Uuid, favourite: bool) -> AppResult<bool>;
}

/// Persistence for [`File`] records.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a file by id regardless of owner.
    async fn get(&self, id: Uuid) -> AppResult<Option<File>>;

    /// Find files matching the filter.
    async fn find(&self, filter: &EntityFilter) -> AppResult<Vec<File>>;

    /// The `limit` most recently created files of an owner, newest first.
    async fn find_recent(&self, owner_id: Uuid, limit: usize) -> AppResult<Vec<File>>;

    /// Insert or replace a file by id, returning the stored record.
    async fn save(&self, file: &File) -> AppResult<File>;

    /// Delete one file record. Returns `false` if it was already gone.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Delete a set of file records by id, returning the count removed.
    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64>;

    /// Directly set the favourite flag of an owned file.
    async fn set_favourite(&self, id: Uuid, owner_id: Uuid, favourite: bool) -> AppResult<bool>;
}

/// Persistence for [`Note`] records.
#[async_trait]
pub trait NoteStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a note by id regardless of owner.
    async fn get(&self, id: Uuid) -> AppResult<Option<Note>>;

    /// Find notes matching the filter (`file_kind` is ignored).
    async fn find(&self, filter: &EntityFilter) -> AppResult<Vec<Note>>;

    /// Insert or replace a note by id, returning the stored record.
    async fn save(&self, note: &Note) -> AppResult<Note>;

    /// Delete one note. Returns `false` if it was already gone.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Delete a set of notes by id, returning the count removed.
    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64>;

    /// Owner-scoped bulk delete: removes `id ∈ ids AND owner_id = owner`,
    /// silently skipping anything else, and returns the count removed.
    async fn delete_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<u64>;

    /// Directly set the favourite flag of an owned note.
    async fn set_favourite(&self, id: Uuid, owner_id: Uuid, favourite: bool) -> AppResult<bool>;
}
