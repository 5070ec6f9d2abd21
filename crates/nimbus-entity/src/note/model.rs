//! Note entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A free-text note, optionally attached to a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    /// Unique note identifier.
    pub id: Uuid,
    /// The note owner.
    pub owner_id: Uuid,
    /// Note title (non-empty).
    pub title: String,
    /// Note body. Required non-empty at creation; later edits may clear it.
    pub content: String,
    /// Containing folder (None for root-level notes).
    pub folder_id: Option<Uuid>,
    /// Whether the owner marked this note as a favourite.
    pub favourite: bool,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
    /// When the note was last edited.
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a new note record with a fresh id and timestamps.
    pub fn new(
        owner_id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        folder_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: title.into(),
            content: content.into(),
            folder_id,
            favourite: false,
            created_at: now,
            updated_at: now,
        }
    }
}
