//! # nimbus-service
//!
//! Business logic layer for Nimbus. Each service orchestrates the entity
//! stores and the blob store to implement one slice of the application:
//! folders, files, notes, favourites, aggregate listings, and duplication.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references, and every operation takes a
//! [`RequestContext`] naming the acting user.

pub mod context;
pub mod duplicate;
pub mod favourite;
pub mod file;
pub mod folder;
pub mod guard;
pub mod listing;
pub mod note;

#[cfg(test)]
pub(crate) mod testutil;

pub use context::RequestContext;
pub use duplicate::DuplicateService;
pub use favourite::FavouriteService;
pub use file::{FileService, FileUpload};
pub use folder::{FolderContents, FolderDeletion, FolderService, Subtree, TreeWalker};
pub use guard::OwnershipGuard;
pub use listing::ListingService;
pub use note::NoteService;
