//! # nimbus-storage
//!
//! Blob store implementations for Nimbus: a local-filesystem backend for
//! deployment and an in-memory backend for tests.

pub mod local;
pub mod memory;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
