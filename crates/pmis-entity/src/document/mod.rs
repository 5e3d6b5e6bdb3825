//! Document domain entities.

pub mod classification;
pub mod model;
pub mod noting;
pub mod status;
pub mod version;

pub use classification::{Discipline, Phase};
pub use model::{CreateDocument, Document};
pub use noting::{NotingAction, NotingEntry};
pub use status::DocumentStatus;
pub use version::{VersionEntry, next_minor_version};
