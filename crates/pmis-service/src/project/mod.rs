//! Project lookup.

pub mod registry;

pub use registry::ProjectRegistry;
