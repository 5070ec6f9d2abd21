pub mod model;

pub use model::Folder;
