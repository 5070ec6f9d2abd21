//! Domain entity models for Nimbus: folders, files, notes, and the
//! polymorphic types that operate across all three kinds.

pub mod entity;
pub mod file;
pub mod filter;
pub mod folder;
pub mod note;

pub use entity::{Entity, EntityKind, EntityRef};
pub use file::{File, FileKind};
pub use filter::{CreatedRange, EntityFilter, ParentScope};
pub use folder::Folder;
pub use note::Note;
