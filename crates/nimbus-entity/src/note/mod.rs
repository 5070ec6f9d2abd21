pub mod model;

pub use model::Note;
