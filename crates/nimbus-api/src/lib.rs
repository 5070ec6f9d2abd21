//! # nimbus-api
//!
//! HTTP adaptation layer for Nimbus. Thin axum handlers translate requests
//! into service calls; all semantics live below in `nimbus-service`.

pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
