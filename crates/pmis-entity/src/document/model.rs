//! Document entity model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pmis_core::types::{DocumentId, ProjectId, UserId};

use super::classification::{Discipline, Phase};
use super::noting::NotingEntry;
use super::status::DocumentStatus;
use super::version::VersionEntry;
use crate::folder::FolderKey;
use crate::user::UserRole;

/// A document record held by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// The document name (including extension).
    pub name: String,
    /// Document type, e.g. `"Drawing"`, `"Report"`.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// MIME type of the file.
    pub mime_type: String,
    /// Free-form category, e.g. `"Structural"`.
    pub category: String,
    /// The engineering discipline.
    pub discipline: Discipline,
    /// The project phase.
    pub phase: Phase,
    /// The owning project.
    pub project_id: ProjectId,
    /// The user who uploaded the document.
    pub uploaded_by: UserId,
    /// Role of the uploader at upload time.
    pub uploader_role: UserRole,
    /// Approval status.
    pub status: DocumentStatus,
    /// Current version label.
    pub version: String,
    /// Whether this record is the latest version of the document.
    pub is_latest_version: bool,
    /// Search tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// File size in bytes.
    pub size_bytes: u64,
    /// When the document was first uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Append-only remark log.
    #[serde(default)]
    pub noting_sheet: Vec<NotingEntry>,
    /// Append-only version log.
    #[serde(default)]
    pub version_history: Vec<VersionEntry>,
}

impl Document {
    /// The discipline folder this document sits in.
    pub fn folder_key(&self) -> FolderKey {
        FolderKey::discipline(self.project_id.clone(), self.phase, self.discipline)
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }

    /// The most recent noting sheet entry.
    pub fn latest_noting(&self) -> Option<&NotingEntry> {
        self.noting_sheet.last()
    }
}

/// Data required to create a new document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// The document name.
    pub name: String,
    /// Document type.
    pub doc_type: String,
    /// MIME type.
    pub mime_type: String,
    /// Category.
    pub category: String,
    /// Discipline.
    pub discipline: Discipline,
    /// Phase.
    pub phase: Phase,
    /// Owning project.
    pub project_id: ProjectId,
    /// Search tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl CreateDocument {
    /// Build the stored record for a first upload by `uploader`.
    pub fn into_document(self, uploaded_by: UserId, uploader_role: UserRole) -> Document {
        let now = Utc::now();
        let first_version = VersionEntry {
            version: "1.0".to_string(),
            uploaded_by: uploaded_by.clone(),
            uploaded_at: now,
            size_bytes: self.size_bytes,
            change_note: Some("Initial upload".to_string()),
        };

        Document {
            id: DocumentId::generate(),
            name: self.name,
            doc_type: self.doc_type,
            mime_type: self.mime_type,
            category: self.category,
            discipline: self.discipline,
            phase: self.phase,
            project_id: self.project_id,
            uploaded_by,
            uploader_role,
            status: DocumentStatus::Draft,
            version: first_version.version.clone(),
            is_latest_version: true,
            tags: self.tags,
            description: self.description,
            size_bytes: self.size_bytes,
            uploaded_at: now,
            noting_sheet: Vec::new(),
            version_history: vec![first_version],
        }
    }
}
