//! PostgreSQL entity store backend.

pub mod connection;
pub mod file;
pub mod folder;
pub mod migration;
pub mod note;

pub use file::PgFileStore;
pub use folder::PgFolderStore;
pub use note::PgNoteStore;
