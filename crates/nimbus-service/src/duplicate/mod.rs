//! Entity duplication, polymorphic over kind.

pub mod service;

pub use service::DuplicateService;
