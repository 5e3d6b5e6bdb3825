//! Display-name lookup used while building the folder tree.

use crate::types::ProjectId;

/// Resolves a project id to its display name.
///
/// Implementations must tolerate ids they do not know by returning `None`;
/// the tree builder substitutes a placeholder label.
pub trait ProjectLookup {
    /// Display name of the project, if known.
    fn project_name(&self, id: &ProjectId) -> Option<String>;
}

impl<F> ProjectLookup for F
where
    F: Fn(&ProjectId) -> Option<String>,
{
    fn project_name(&self, id: &ProjectId) -> Option<String> {
        self(id)
    }
}
