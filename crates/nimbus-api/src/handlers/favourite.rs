//! Favourite handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{FavouriteBatchRequest, parse_refs};
use crate::dto::response::success;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/favourites/toggle
pub async fn toggle(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<FavouriteBatchRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entries = parse_refs(&req.entities)?;
    let updated = state
        .favourite_service
        .toggle_multiple(&auth, &entries)
        .await?;
    Ok(success(updated))
}

/// POST /api/favourites/remove
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<FavouriteBatchRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entries = parse_refs(&req.entities)?;
    let updated = state
        .favourite_service
        .unfavourite_multiple(&auth, &entries)
        .await?;
    Ok(success(serde_json::json!({ "updated": updated })))
}

/// GET /api/favourites
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let favourites = state.favourite_service.list_favourites(&auth).await?;
    Ok(success(favourites))
}
