//! # pmis-service
//!
//! Service layer for the PMIS document management engine. The `edms`
//! module holds the pure explorer engine (folder tree derivation, path
//! resolution, and filtering); the remaining modules wrap the shared
//! document store with role-checked use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod document;
pub mod edms;
pub mod project;
pub mod report;
pub mod seed;
pub mod state;

pub use context::RequestContext;
pub use document::{DocumentService, DocumentStore, NotingService, VersionService};
pub use edms::{ExplorerState, FolderFilter, FolderPath, TreeBuilder, apply_filter, build_tree};
pub use project::ProjectRegistry;
pub use report::DocumentStats;
pub use seed::Seed;
pub use state::AppState;
