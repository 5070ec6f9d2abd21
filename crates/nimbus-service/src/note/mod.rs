//! Note CRUD.

pub mod service;

pub use service::NoteService;
