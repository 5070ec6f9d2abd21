//! Traits for external collaborators.

pub mod blob;
