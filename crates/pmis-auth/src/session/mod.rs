//! Login sessions backed by the seeded user directory.

pub mod directory;
pub mod manager;

pub use directory::UserDirectory;
pub use manager::{Session, SessionManager};
