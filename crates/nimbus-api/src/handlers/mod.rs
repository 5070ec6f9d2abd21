//! HTTP handlers grouped by domain.

pub mod favourite;
pub mod file;
pub mod folder;
pub mod health;
pub mod note;
