//! File upload, listing, rename, and deletion.

pub mod service;

pub use service::{FileService, FileUpload};
