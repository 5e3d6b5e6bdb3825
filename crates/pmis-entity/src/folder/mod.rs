//! Folder domain entities.

pub mod node;
pub mod tree;

pub use node::{FolderKey, FolderKind, FolderNode, ROOT_ID};
pub use tree::FolderTree;
