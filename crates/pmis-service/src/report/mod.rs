//! Dashboard summaries over the document collection.

pub mod stats;

pub use stats::{CountEntry, DocumentStats};
