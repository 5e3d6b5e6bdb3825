//! Folder keys and nodes of the synthetic document hierarchy.
//!
//! Folders are not stored anywhere. They are derived from the
//! `(project, phase, discipline)` triple carried by every document.

use serde::{Deserialize, Serialize};
use std::fmt;

use pmis_core::types::ProjectId;

use crate::document::{Discipline, Phase};

/// Id of the synthetic root folder.
pub const ROOT_ID: &str = "all";

/// Level of a folder in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderKind {
    /// The "All Documents" root.
    Root,
    /// One folder per project.
    Project,
    /// One folder per phase within a project.
    Phase,
    /// One folder per discipline within a phase.
    Discipline,
}

impl FolderKind {
    /// The kind of this kind's children, if any.
    pub fn child_kind(&self) -> Option<FolderKind> {
        match self {
            Self::Root => Some(Self::Project),
            Self::Project => Some(Self::Phase),
            Self::Phase => Some(Self::Discipline),
            Self::Discipline => None,
        }
    }
}

/// Structured position of a folder in the hierarchy.
///
/// Carries the decomposed `(project, phase, discipline)` triple so callers
/// never need to split a composite id string to recover it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FolderKey {
    /// The root folder.
    #[default]
    Root,
    /// A project folder.
    Project {
        /// The project.
        project_id: ProjectId,
    },
    /// A phase folder.
    Phase {
        /// The project.
        project_id: ProjectId,
        /// The phase.
        phase: Phase,
    },
    /// A discipline folder.
    Discipline {
        /// The project.
        project_id: ProjectId,
        /// The phase.
        phase: Phase,
        /// The discipline.
        discipline: Discipline,
    },
}

impl FolderKey {
    /// Key of a project folder.
    pub fn project(project_id: impl Into<ProjectId>) -> Self {
        Self::Project {
            project_id: project_id.into(),
        }
    }

    /// Key of a phase folder.
    pub fn phase(project_id: impl Into<ProjectId>, phase: Phase) -> Self {
        Self::Phase {
            project_id: project_id.into(),
            phase,
        }
    }

    /// Key of a discipline folder.
    pub fn discipline(project_id: impl Into<ProjectId>, phase: Phase, discipline: Discipline) -> Self {
        Self::Discipline {
            project_id: project_id.into(),
            phase,
            discipline,
        }
    }

    /// The folder level this key addresses.
    pub fn kind(&self) -> FolderKind {
        match self {
            Self::Root => FolderKind::Root,
            Self::Project { .. } => FolderKind::Project,
            Self::Phase { .. } => FolderKind::Phase,
            Self::Discipline { .. } => FolderKind::Discipline,
        }
    }

    /// Depth below the root (root = 0).
    pub fn depth(&self) -> usize {
        match self {
            Self::Root => 0,
            Self::Project { .. } => 1,
            Self::Phase { .. } => 2,
            Self::Discipline { .. } => 3,
        }
    }

    /// The project restriction, if any.
    pub fn project_id(&self) -> Option<&ProjectId> {
        match self {
            Self::Root => None,
            Self::Project { project_id }
            | Self::Phase { project_id, .. }
            | Self::Discipline { project_id, .. } => Some(project_id),
        }
    }

    /// The phase restriction, if any.
    pub fn phase_restriction(&self) -> Option<Phase> {
        match self {
            Self::Phase { phase, .. } | Self::Discipline { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// The discipline restriction, if any.
    pub fn discipline_restriction(&self) -> Option<Discipline> {
        match self {
            Self::Discipline { discipline, .. } => Some(*discipline),
            _ => None,
        }
    }

    /// Composite node id: `all`, `{project}`, `{project}-{phase}` or
    /// `{project}-{phase}-{discipline}`.
    pub fn node_id(&self) -> String {
        match self {
            Self::Root => ROOT_ID.to_string(),
            Self::Project { project_id } => project_id.to_string(),
            Self::Phase { project_id, phase } => format!("{project_id}-{phase}"),
            Self::Discipline {
                project_id,
                phase,
                discipline,
            } => format!("{project_id}-{phase}-{discipline}"),
        }
    }

    /// The enclosing folder, `None` for the root.
    pub fn parent(&self) -> Option<FolderKey> {
        match self {
            Self::Root => None,
            Self::Project { .. } => Some(Self::Root),
            Self::Phase { project_id, .. } => Some(Self::Project {
                project_id: project_id.clone(),
            }),
            Self::Discipline {
                project_id, phase, ..
            } => Some(Self::Phase {
                project_id: project_id.clone(),
                phase: *phase,
            }),
        }
    }

    /// Every key from the root down to and including this one.
    pub fn lineage(&self) -> Vec<FolderKey> {
        let mut chain = vec![self.clone()];
        let mut current = self.parent();
        while let Some(key) = current {
            current = key.parent();
            chain.push(key);
        }
        chain.reverse();
        chain
    }
}

impl fmt::Display for FolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node_id())
    }
}

/// A node in the derived folder tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Composite node id (see [`FolderKey::node_id`]).
    pub id: String,
    /// Structured position.
    pub key: FolderKey,
    /// Display label.
    pub name: String,
    /// Number of documents at or below this folder.
    pub document_count: u64,
    /// Child folders, in first-seen order.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Create an empty node for `key`.
    pub fn new(key: FolderKey, name: impl Into<String>) -> Self {
        Self {
            id: key.node_id(),
            key,
            name: name.into(),
            document_count: 0,
            children: Vec::new(),
        }
    }

    /// The folder level.
    pub fn kind(&self) -> FolderKind {
        self.key.kind()
    }

    /// Number of direct child folders.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Depth-first search for a node by id, this node included.
    pub fn find(&self, id: &str) -> Option<&FolderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Depth-first search for a node by structured key.
    pub fn find_key(&self, key: &FolderKey) -> Option<&FolderNode> {
        if &self.key == key {
            return Some(self);
        }
        if self.key.depth() >= key.depth() {
            return None;
        }
        self.children.iter().find_map(|child| child.find_key(key))
    }

    /// Index of the child with `key`, if present.
    pub fn child_position(&self, key: &FolderKey) -> Option<usize> {
        self.children.iter().position(|child| &child.key == key)
    }
}
