//! Note handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use nimbus_core::error::AppError;

use crate::dto::request::{
    CreateNoteRequest, DeleteNotesRequest, EditNoteRequest, RenameNoteRequest,
};
use crate::dto::response::success;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/notes/create
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateNoteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let note = state
        .note_service
        .create_note(&auth, &req.title, &req.content, req.folder_id)
        .await?;
    Ok(success(note))
}

/// PUT /api/notes/edit/{id}
pub async fn edit_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<EditNoteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let note = state
        .note_service
        .edit_note(&auth, id, &req.title, &req.content)
        .await?;
    Ok(success(note))
}

/// PATCH /api/notes/rename
pub async fn rename_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RenameNoteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let note = state
        .note_service
        .rename_title(&auth, req.note_id, &req.new_title)
        .await?;
    Ok(success(note))
}

/// GET /api/notes
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let notes = state.note_service.list_notes(&auth).await?;
    Ok(success(notes))
}

/// GET /api/notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let note = state.note_service.get_note(&auth, id).await?;
    Ok(success(note))
}

/// DELETE /api/notes/delete
pub async fn delete_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DeleteNotesRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = state.note_service.delete_notes(&auth, &req.note_ids).await?;
    Ok(success(serde_json::json!({ "deleted": removed })))
}
