//! The document explorer engine.
//!
//! - `tree` derives the project → phase → discipline folder tree
//! - `path` maps selected folders to document filters and breadcrumbs
//! - `filter` applies folder and free-text restrictions
//! - `explorer` holds per-view state over a cached tree
//!
//! Everything here is synchronous and total: no operation fails.

pub mod explorer;
pub mod filter;
pub mod path;
pub mod tree;

pub use explorer::{ContextAction, ContextMenu, ExplorerState};
pub use filter::{SearchQuery, apply_filter, filter_documents};
pub use path::{
    Breadcrumb, FolderFilter, FolderPath, breadcrumbs, label_for, parse_legacy_id, resolve_filter,
};
pub use tree::{TreeBuilder, build_tree};
