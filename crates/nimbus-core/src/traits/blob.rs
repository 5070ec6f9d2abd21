//! Blob store trait for physical byte storage.
//!
//! The entity layer records only an opaque locator per file; the bytes
//! themselves live behind this trait. The [`BlobStore`] trait is defined
//! here in `nimbus-core` and implemented in `nimbus-storage`.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for physical byte storage backends.
///
/// Locators are opaque to callers: they are minted by [`store`] and only
/// ever passed back verbatim.
///
/// [`store`]: BlobStore::store
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Persist a blob and return its locator. `name_hint` only influences
    /// the locator's readable suffix, never its uniqueness.
    async fn store(&self, data: Bytes, name_hint: &str) -> AppResult<String>;

    /// Read a blob back into memory.
    async fn read(&self, locator: &str) -> AppResult<Bytes>;

    /// Delete a blob. Deleting an absent locator is a no-op, which keeps
    /// record deletion re-runnable after a partial failure.
    async fn delete(&self, locator: &str) -> AppResult<()>;

    /// Check whether a blob exists at the given locator.
    async fn exists(&self, locator: &str) -> AppResult<bool>;

    /// Physically copy a blob, returning the fresh locator. The two
    /// locators are independently deletable afterwards.
    async fn copy(&self, locator: &str, name_hint: &str) -> AppResult<String>;
}
