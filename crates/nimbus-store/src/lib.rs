//! The entity store: persistence traits for the three entity kinds plus
//! the PostgreSQL production backend and the in-memory test backend.

pub mod memory;
pub mod postgres;
pub mod traits;

pub use traits::{FileStore, FolderStore, NoteStore};
