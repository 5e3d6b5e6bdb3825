//! Document-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::{DocumentId, ProjectId};

/// Events related to document records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DocumentEvent {
    /// A document was added to the store.
    Created {
        /// The document ID.
        document_id: DocumentId,
        /// The owning project.
        project_id: ProjectId,
        /// The document name.
        name: String,
    },
    /// A document's metadata changed.
    Updated {
        /// The document ID.
        document_id: DocumentId,
    },
    /// A document was removed from the store.
    Deleted {
        /// The document ID.
        document_id: DocumentId,
        /// The document name (for display after deletion).
        name: String,
    },
    /// A noting sheet entry was appended.
    Noted {
        /// The document ID.
        document_id: DocumentId,
        /// The action recorded (`"approve"`, `"comment"`, ...).
        action: String,
    },
    /// A new version was recorded.
    VersionAdded {
        /// The document ID.
        document_id: DocumentId,
        /// The new version string.
        version: String,
    },
}

impl DocumentEvent {
    /// The document the event refers to.
    pub fn document_id(&self) -> &DocumentId {
        match self {
            Self::Created { document_id, .. }
            | Self::Updated { document_id }
            | Self::Deleted { document_id, .. }
            | Self::Noted { document_id, .. }
            | Self::VersionAdded { document_id, .. } => document_id,
        }
    }
}
