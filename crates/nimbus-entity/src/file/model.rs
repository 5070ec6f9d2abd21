//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::FileKind;

/// An uploaded file's metadata record.
///
/// The bytes themselves live in blob storage behind `locator`; this record
/// only carries the catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file owner.
    pub owner_id: Uuid,
    /// File name including extension (non-empty).
    pub name: String,
    /// Image or PDF.
    pub kind: FileKind,
    /// Containing folder (None for root-level files).
    pub folder_id: Option<Uuid>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Opaque reference into blob storage.
    pub locator: String,
    /// Whether the owner marked this file as a favourite.
    pub favourite: bool,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
}

impl File {
    /// Build a new file record with a fresh id and timestamp.
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        kind: FileKind,
        folder_id: Option<Uuid>,
        size_bytes: i64,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            kind,
            folder_id,
            size_bytes,
            locator: locator.into(),
            favourite: false,
            created_at: Utc::now(),
        }
    }
}
