//! Aggregate listings across entity kinds.

pub mod service;

pub use service::ListingService;
