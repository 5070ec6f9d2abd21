//! Favourite flag management across entity kinds.

pub mod service;

pub use service::FavouriteService;
