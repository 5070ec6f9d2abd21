//! Nimbus server entry point.
//!
//! Wires configuration, database, blob storage, and the domain services
//! together, then serves the HTTP API until a shutdown signal arrives.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use nimbus_core::config::AppConfig;
use nimbus_core::error::AppError;
use nimbus_core::traits::blob::BlobStore;
use nimbus_service::{
    DuplicateService, FavouriteService, FileService, FolderService, ListingService, NoteService,
    OwnershipGuard,
};
use nimbus_storage::LocalBlobStore;
use nimbus_store::postgres::{PgFileStore, PgFolderStore, PgNoteStore, connection, migration};
use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("NIMBUS_ENV").unwrap_or_else(|_| "default".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing output from the logging configuration.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Nimbus v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let pool = connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    migration::run_migrations(&pool).await?;

    let blob_root = format!("{}/blobs", config.storage.data_root);
    let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(&blob_root).await?);
    tracing::info!(root = %blob_root, "Blob storage initialized");

    let folders: Arc<dyn FolderStore> = Arc::new(PgFolderStore::new(pool.clone()));
    let files: Arc<dyn FileStore> = Arc::new(PgFileStore::new(pool.clone()));
    let notes: Arc<dyn NoteStore> = Arc::new(PgNoteStore::new(pool.clone()));

    let guard = OwnershipGuard::new(folders.clone(), files.clone(), notes.clone());

    let folder_service = Arc::new(FolderService::new(
        folders.clone(),
        files.clone(),
        notes.clone(),
        blobs.clone(),
    ));
    let file_service = Arc::new(FileService::new(
        files.clone(),
        blobs.clone(),
        guard.clone(),
    ));
    let note_service = Arc::new(NoteService::new(notes.clone(), guard.clone()));
    let favourite_service = Arc::new(FavouriteService::new(
        folders.clone(),
        files.clone(),
        notes.clone(),
    ));
    let listing_service = Arc::new(ListingService::new(
        folders.clone(),
        files.clone(),
        notes.clone(),
    ));
    let duplicate_service = Arc::new(DuplicateService::new(
        folders.clone(),
        files.clone(),
        notes.clone(),
        blobs.clone(),
    ));

    let state = nimbus_api::AppState {
        config: Arc::new(config.clone()),
        jwt: Arc::new(nimbus_api::auth::JwtVerifier::new(&config.auth)),
        folder_service,
        file_service,
        note_service,
        favourite_service,
        listing_service,
        duplicate_service,
    };

    let app = nimbus_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Nimbus listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Nimbus shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
