//! File domain entities.

pub mod model;
pub mod name;

pub use model::FileRecord;
pub use name::validate_filename;
