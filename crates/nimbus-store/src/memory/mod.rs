//! In-memory entity store backend.

pub mod store;

pub use store::MemoryStore;
