//! Core traits defined in `pmis-core` and implemented by other crates.

pub mod lookup;
pub mod repository;

pub use lookup::ProjectLookup;
pub use repository::Repository;
