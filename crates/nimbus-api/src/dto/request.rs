//! Request DTOs with validation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_entity::{EntityKind, EntityRef};

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent folder ID (omit for root level).
    pub parent_id: Option<Uuid>,
}

/// Rename folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// Folder to rename.
    pub folder_id: Uuid,
    /// New name.
    #[validate(length(min = 1, max = 255))]
    pub new_name: String,
}

/// Delete folders request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFoldersRequest {
    /// Folders to delete recursively.
    pub folder_ids: Vec<Uuid>,
}

/// Rename file request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFileRequest {
    /// File to rename.
    pub file_id: Uuid,
    /// New name.
    #[validate(length(min = 1, max = 255))]
    pub new_name: String,
}

/// Delete files request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFilesRequest {
    /// Files to delete.
    pub file_ids: Vec<Uuid>,
}

/// By-date listing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ByDateRequest {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
}

/// One (id, kind) entry in a polymorphic batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRefDto {
    /// Entity id.
    pub id: Uuid,
    /// Entity kind: `image`, `pdf`, `folder`, or `note`.
    pub entity_type: String,
}

impl EntityRefDto {
    /// Parse the wire kind tag, rejecting unknown values.
    pub fn to_ref(&self) -> AppResult<EntityRef> {
        let kind = EntityKind::from_str(&self.entity_type)
            .map_err(|_| AppError::validation(format!("Unknown entity type: {}", self.entity_type)))?;
        Ok(EntityRef { id: self.id, kind })
    }
}

/// Parse a whole batch of entity references up front.
pub fn parse_refs(entries: &[EntityRefDto]) -> AppResult<Vec<EntityRef>> {
    entries.iter().map(EntityRefDto::to_ref).collect()
}

/// Duplicate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateRequest {
    /// Entity to duplicate.
    #[serde(flatten)]
    pub entity: EntityRefDto,
}

/// Favourite batch request (toggle and remove).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavouriteBatchRequest {
    /// The entities to act on.
    pub entities: Vec<EntityRefDto>,
}

/// Create note request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNoteRequest {
    /// Note title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Note body.
    #[validate(length(min = 1))]
    pub content: String,
    /// Containing folder (omit for root level).
    pub folder_id: Option<Uuid>,
}

/// Edit note request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EditNoteRequest {
    /// New title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// New body (may be empty).
    pub content: String,
}

/// Rename note request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameNoteRequest {
    /// Note to rename.
    pub note_id: Uuid,
    /// New title.
    #[validate(length(min = 1, max = 255))]
    pub new_title: String,
}

/// Delete notes request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteNotesRequest {
    /// Notes to delete.
    pub note_ids: Vec<Uuid>,
}
