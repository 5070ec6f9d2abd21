//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in the per-user hierarchy.
///
/// Folders nest arbitrarily deep through `parent_id`; `None` means the
/// folder sits at the root level. The parent chain always stays within a
/// single owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Folder name (non-empty; duplicates within a parent are allowed).
    pub name: String,
    /// Parent folder ID (None for root-level folders).
    pub parent_id: Option<Uuid>,
    /// Whether the owner marked this folder as a favourite.
    pub favourite: bool,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Build a new folder record with a fresh id and timestamp.
    pub fn new(owner_id: Uuid, name: impl Into<String>, parent_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            parent_id,
            favourite: false,
            created_at: Utc::now(),
        }
    }
}
