//! Project domain entities.

pub mod model;

pub use model::{Project, ProjectStatus};
