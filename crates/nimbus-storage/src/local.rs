//! Local filesystem blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::result::AppResult;
use nimbus_core::traits::blob::BlobStore;

/// Blob store writing under a single root directory.
///
/// Locators are flat, uuid-prefixed filenames, so two blobs stored with the
/// same name hint never collide.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a blob store rooted at the given path, creating it if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a locator to an absolute path within the root.
    fn resolve(&self, locator: &str) -> PathBuf {
        let clean = locator.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Mint a fresh locator from a name hint.
    fn mint_locator(name_hint: &str) -> String {
        format!("{}-{}", Uuid::new_v4(), sanitize(name_hint))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn store(&self, data: Bytes, name_hint: &str) -> AppResult<String> {
        let locator = Self::mint_locator(name_hint);
        let full_path = self.resolve(&locator);
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob: {locator}"),
                e,
            )
        })?;

        debug!(locator, bytes = data.len(), "Stored blob");
        Ok(locator)
    }

    async fn read(&self, locator: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(locator);
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {locator}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read blob: {locator}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, locator: &str) -> AppResult<()> {
        let full_path = self.resolve(locator);
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {locator}"),
                e,
            )),
        }
    }

    async fn exists(&self, locator: &str) -> AppResult<bool> {
        let full_path = self.resolve(locator);
        Ok(full_path.exists())
    }

    async fn copy(&self, locator: &str, name_hint: &str) -> AppResult<String> {
        let new_locator = Self::mint_locator(name_hint);
        let from_path = self.resolve(locator);
        let to_path = self.resolve(&new_locator);
        self.ensure_parent(&to_path).await?;

        fs::copy(&from_path, &to_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {locator}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to copy blob {locator} -> {new_locator}"),
                    e,
                )
            }
        })?;

        debug!(from = locator, to = new_locator.as_str(), "Copied blob");
        Ok(new_locator)
    }
}

/// Keep a name hint filesystem-safe without losing its readable suffix.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let data = Bytes::from("hello world");
        let locator = store.store(data.clone(), "greeting.txt").await.unwrap();
        assert!(locator.ends_with("greeting.txt"));
        assert!(store.exists(&locator).await.unwrap());

        let read_back = store.read(&locator).await.unwrap();
        assert_eq!(read_back, data);

        store.delete(&locator).await.unwrap();
        assert!(!store.exists(&locator).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        store.delete("no-such-locator").await.unwrap();
    }

    #[tokio::test]
    async fn test_copy_is_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let original = store
            .store(Bytes::from("content"), "doc.pdf")
            .await
            .unwrap();
        let copy = store.copy(&original, "doc-copy.pdf").await.unwrap();
        assert_ne!(original, copy);

        store.delete(&original).await.unwrap();
        assert!(store.exists(&copy).await.unwrap());
        assert_eq!(store.read(&copy).await.unwrap(), Bytes::from("content"));
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let err = store.read("missing").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("report.pdf"), "report.pdf");
        assert_eq!(sanitize("my photo (1).png"), "my_photo__1_.png");
    }
}
