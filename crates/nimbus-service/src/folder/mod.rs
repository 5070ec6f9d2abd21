//! Folder management and subtree traversal.

pub mod service;
pub mod tree;

pub use service::{FolderContents, FolderDeletion, FolderService};
pub use tree::{Subtree, TreeWalker};
