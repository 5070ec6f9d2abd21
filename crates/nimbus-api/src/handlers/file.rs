//! File handlers: upload, listings, rename, delete, duplicate, by-date.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use uuid::Uuid;
use validator::Validate;

use nimbus_core::error::AppError;
use nimbus_service::file::FileUpload;

use crate::dto::request::{ByDateRequest, DeleteFilesRequest, DuplicateRequest, RenameFileRequest};
use crate::dto::response::success;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/upload (multipart)
///
/// File parts carry the bytes; an optional `folder_id` text part places
/// the batch inside a folder.
pub async fn upload_files(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut folder_id = None;
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        if field_name.as_deref() == Some("folder_id") {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::validation(format!("Malformed folder_id field: {e}")))?;
            if !text.is_empty() {
                folder_id = Some(
                    text.parse::<Uuid>()
                        .map_err(|_| AppError::validation("Invalid folder_id"))?,
                );
            }
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;
        uploads.push(FileUpload {
            name,
            content_type,
            data,
        });
    }

    let files = state.file_service.upload(&auth, folder_id, uploads).await?;
    Ok(success(files))
}

/// GET /api/files/folder/{id}
pub async fn list_by_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let files = state.file_service.list_in_folder(&auth, id).await?;
    Ok(success(files))
}

/// GET /api/files/user
pub async fn list_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let files = state.file_service.list_all(&auth).await?;
    Ok(success(files))
}

/// GET /api/files/root
pub async fn list_root(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let files = state.file_service.list_root(&auth).await?;
    Ok(success(files))
}

/// GET /api/files/images
pub async fn list_images(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let files = state.file_service.list_images(&auth).await?;
    Ok(success(files))
}

/// GET /api/files/pdfs
pub async fn list_pdfs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let files = state.file_service.list_pdfs(&auth).await?;
    Ok(success(files))
}

/// GET /api/files/recent
pub async fn list_recent(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entities = state.listing_service.recent(&auth).await?;
    Ok(success(entities))
}

/// PUT /api/files/rename
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RenameFileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let file = state
        .file_service
        .rename_file(&auth, req.file_id, &req.new_name)
        .await?;
    Ok(success(file))
}

/// DELETE /api/files/delete
pub async fn delete_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DeleteFilesRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = state.file_service.delete_files(&auth, &req.file_ids).await?;
    Ok(success(serde_json::json!({ "deleted": removed })))
}

/// POST /api/files/duplicate
pub async fn duplicate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DuplicateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entry = req.entity.to_ref()?;
    let copy = state.duplicate_service.duplicate(&auth, entry).await?;
    Ok(success(copy))
}

/// POST /api/files/by-date
pub async fn list_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ByDateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entities = state.listing_service.by_date(&auth, &req.date).await?;
    Ok(success(entities))
}
