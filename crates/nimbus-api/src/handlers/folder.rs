//! Folder handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use nimbus_core::error::AppError;

use crate::dto::request::{CreateFolderRequest, DeleteFoldersRequest, RenameFolderRequest};
use crate::dto::response::success;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .create_folder(&auth, &req.name, req.parent_id)
        .await?;
    Ok(success(folder))
}

/// GET /api/folders
pub async fn list_root_contents(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let contents = state.folder_service.list_contents(&auth, None).await?;
    Ok(success(contents))
}

/// GET /api/folders/{id}
pub async fn list_folder_contents(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let contents = state.folder_service.list_contents(&auth, Some(id)).await?;
    Ok(success(contents))
}

/// PUT /api/folders/rename
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RenameFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .rename_folder(&auth, req.folder_id, &req.new_name)
        .await?;
    Ok(success(folder))
}

/// DELETE /api/folders/delete
pub async fn delete_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DeleteFoldersRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let outcome = state
        .folder_service
        .delete_folders(&auth, &req.folder_ids)
        .await?;
    Ok(success(outcome))
}
