//! Core building blocks shared by every Nimbus crate: the unified error
//! type, configuration schemas, and the external-collaborator traits.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
