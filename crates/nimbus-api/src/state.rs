//! Application state shared across all handlers.

use std::sync::Arc;

use nimbus_core::config::AppConfig;
use nimbus_service::{
    DuplicateService, FavouriteService, FileService, FolderService, ListingService, NoteService,
};

use crate::auth::JwtVerifier;

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Access-token verifier.
    pub jwt: Arc<JwtVerifier>,

    /// Folder service.
    pub folder_service: Arc<FolderService>,
    /// File service.
    pub file_service: Arc<FileService>,
    /// Note service.
    pub note_service: Arc<NoteService>,
    /// Favourite service.
    pub favourite_service: Arc<FavouriteService>,
    /// Listing service.
    pub listing_service: Arc<ListingService>,
    /// Duplicate service.
    pub duplicate_service: Arc<DuplicateService>,
}
