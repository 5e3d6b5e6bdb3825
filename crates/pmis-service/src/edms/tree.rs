//! Folder tree derivation.
//!
//! The tree is recomputed from the full document collection every time it
//! changes. It is never patched incrementally, so counts and first-seen
//! ordering always reflect the collection exactly.

use std::collections::HashMap;

use tracing::debug;

use pmis_core::config::edms::EdmsConfig;
use pmis_core::traits::ProjectLookup;
use pmis_core::types::ProjectId;
use pmis_entity::document::Document;
use pmis_entity::folder::{FolderKey, FolderNode, FolderTree};

/// Builds [`FolderTree`]s with configurable labels.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    /// Label of the root folder.
    root_label: String,
    /// Label used for projects the lookup does not know.
    unknown_project_label: String,
}

impl TreeBuilder {
    /// Creates a builder with explicit labels.
    pub fn new(root_label: impl Into<String>, unknown_project_label: impl Into<String>) -> Self {
        Self {
            root_label: root_label.into(),
            unknown_project_label: unknown_project_label.into(),
        }
    }

    /// Creates a builder from the explorer configuration.
    pub fn from_config(config: &EdmsConfig) -> Self {
        Self::new(&config.root_label, &config.unknown_project_label)
    }

    /// Label of the root folder.
    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    /// Derive the folder tree from `documents` in a single pass.
    ///
    /// Every document increments the count of the root, its project, its
    /// phase and its discipline folder. Children appear in the order their
    /// first document was encountered. Siblings are keyed by exact folder
    /// key, never by display name.
    pub fn build<L>(&self, documents: &[Document], projects: &L) -> FolderTree
    where
        L: ProjectLookup + ?Sized,
    {
        let mut root = FolderNode::new(FolderKey::Root, self.root_label.clone());
        let mut project_positions: HashMap<&ProjectId, usize> = HashMap::new();

        for doc in documents {
            root.document_count += 1;

            let project_pos = *project_positions
                .entry(&doc.project_id)
                .or_insert_with(|| {
                    let name = projects
                        .project_name(&doc.project_id)
                        .unwrap_or_else(|| self.unknown_project_label.clone());
                    root.children
                        .push(FolderNode::new(FolderKey::project(doc.project_id.clone()), name));
                    root.children.len() - 1
                });
            let project = &mut root.children[project_pos];
            project.document_count += 1;

            let phase_key = FolderKey::phase(doc.project_id.clone(), doc.phase);
            let phase = child_or_insert(project, phase_key, doc.phase.as_str());
            phase.document_count += 1;

            let discipline = child_or_insert(phase, doc.folder_key(), doc.discipline.as_str());
            discipline.document_count += 1;
        }

        debug!(
            documents = documents.len(),
            projects = root.children.len(),
            "Folder tree rebuilt"
        );

        FolderTree::new(root)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::from_config(&EdmsConfig::default())
    }
}

/// Derive the folder tree with the default labels.
pub fn build_tree<L>(documents: &[Document], projects: &L) -> FolderTree
where
    L: ProjectLookup + ?Sized,
{
    TreeBuilder::default().build(documents, projects)
}

/// Find the child with `key`, appending a new one if absent.
fn child_or_insert<'a>(parent: &'a mut FolderNode, key: FolderKey, name: &str) -> &'a mut FolderNode {
    let pos = match parent.child_position(&key) {
        Some(pos) => pos,
        None => {
            parent.children.push(FolderNode::new(key, name));
            parent.children.len() - 1
        }
    };
    &mut parent.children[pos]
}
