//! Route definitions for the Nimbus HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via axum's `State`
//! extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, patch, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(note_routes())
        .merge(favourite_routes())
        .route("/health", get(handlers::health::health));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Folder create, listing, rename, recursive delete.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders", get(handlers::folder::list_root_contents))
        .route("/folders/{id}", get(handlers::folder::list_folder_contents))
        .route("/folders/rename", put(handlers::folder::rename_folder))
        .route("/folders/delete", delete(handlers::folder::delete_folders))
}

/// File upload, listings, rename, delete, duplication, by-date.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/upload", post(handlers::file::upload_files))
        .route("/files/folder/{id}", get(handlers::file::list_by_folder))
        .route("/files/user", get(handlers::file::list_all))
        .route("/files/root", get(handlers::file::list_root))
        .route("/files/images", get(handlers::file::list_images))
        .route("/files/pdfs", get(handlers::file::list_pdfs))
        .route("/files/recent", get(handlers::file::list_recent))
        .route("/files/rename", put(handlers::file::rename_file))
        .route("/files/delete", delete(handlers::file::delete_files))
        .route("/files/duplicate", post(handlers::file::duplicate))
        .route("/files/by-date", post(handlers::file::list_by_date))
}

/// Note CRUD.
fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/notes/create", post(handlers::note::create_note))
        .route("/notes/edit/{id}", put(handlers::note::edit_note))
        .route("/notes/rename", patch(handlers::note::rename_note))
        .route("/notes/delete", delete(handlers::note::delete_notes))
        .route("/notes", get(handlers::note::list_notes))
        .route("/notes/{id}", get(handlers::note::get_note))
}

/// Favourite toggling and listing.
fn favourite_routes() -> Router<AppState> {
    Router::new()
        .route("/favourites/toggle", post(handlers::favourite::toggle))
        .route("/favourites/remove", post(handlers::favourite::remove))
        .route("/favourites", get(handlers::favourite::list))
}

/// Translate the CORS configuration into a tower-http layer.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_headers(Any)
        .max_age(Duration::from_secs(cors_config.max_age_seconds));

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors.allow_methods(methods)
}
