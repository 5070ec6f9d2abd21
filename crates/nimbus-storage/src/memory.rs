//! In-memory blob store.
//!
//! Backs service tests that need real blob semantics without touching disk.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use uuid::Uuid;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_core::traits::blob::BlobStore;

/// Blob store keeping all bytes in a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Bytes>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the store holds no blobs at all.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn store(&self, data: Bytes, name_hint: &str) -> AppResult<String> {
        let locator = format!("{}-{name_hint}", Uuid::new_v4());
        self.blobs.insert(locator.clone(), data);
        Ok(locator)
    }

    async fn read(&self, locator: &str) -> AppResult<Bytes> {
        self.blobs
            .get(locator)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {locator}")))
    }

    async fn delete(&self, locator: &str) -> AppResult<()> {
        self.blobs.remove(locator);
        Ok(())
    }

    async fn exists(&self, locator: &str) -> AppResult<bool> {
        Ok(self.blobs.contains_key(locator))
    }

    async fn copy(&self, locator: &str, name_hint: &str) -> AppResult<String> {
        let data = self.read(locator).await?;
        self.store(data, name_hint).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::error::ErrorKind;

    #[tokio::test]
    async fn test_store_and_read() {
        let store = MemoryBlobStore::new();
        let locator = store.store(Bytes::from("abc"), "a.txt").await.unwrap();
        assert_eq!(store.read(&locator).await.unwrap(), Bytes::from("abc"));
        assert!(!store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryBlobStore::new();
        let locator = store.store(Bytes::from("abc"), "a.txt").await.unwrap();
        store.delete(&locator).await.unwrap();
        store.delete(&locator).await.unwrap();
        assert!(!store.exists(&locator).await.unwrap());
    }

    #[tokio::test]
    async fn test_copy_missing_blob() {
        let store = MemoryBlobStore::new();
        let err = store.copy("ghost", "g.txt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
