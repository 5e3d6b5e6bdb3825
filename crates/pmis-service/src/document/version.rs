//! Document version history.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use pmis_auth::{Capability, RbacEnforcer};
use pmis_core::error::AppError;
use pmis_core::events::DocumentEvent;
use pmis_core::traits::Repository;
use pmis_core::types::DocumentId;
use pmis_entity::document::{Document, DocumentStatus, VersionEntry, next_minor_version};

use super::authorize;
use super::store::DocumentStore;
use crate::context::RequestContext;

/// Request to record a new version of a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddVersionRequest {
    /// What changed.
    #[serde(default)]
    pub change_note: Option<String>,
    /// Size of the new file in bytes.
    pub size_bytes: u64,
}

/// Manages document versions.
#[derive(Debug, Clone)]
pub struct VersionService {
    /// Document store.
    store: Arc<DocumentStore>,
    /// Role enforcement.
    rbac: RbacEnforcer,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(store: Arc<DocumentStore>, rbac: RbacEnforcer) -> Self {
        Self { store, rbac }
    }

    /// Records a new minor version. The document returns to draft and must
    /// be submitted again.
    pub async fn add_version(
        &self,
        ctx: &RequestContext,
        id: &DocumentId,
        req: AddVersionRequest,
    ) -> Result<Document, AppError> {
        authorize(&self.rbac, ctx, Capability::UploadDocument)?;

        let change_note = req
            .change_note
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty());

        let document = self
            .store
            .modify(Some(&ctx.user_id), id, |doc| {
                ctx.require_project(&doc.project_id)?;
                let version = next_minor_version(&doc.version);
                doc.version_history.push(VersionEntry {
                    version: version.clone(),
                    uploaded_by: ctx.user_id.clone(),
                    uploaded_at: Utc::now(),
                    size_bytes: req.size_bytes,
                    change_note,
                });
                doc.version = version.clone();
                doc.size_bytes = req.size_bytes;
                doc.is_latest_version = true;
                doc.status = DocumentStatus::Draft;
                Ok(DocumentEvent::VersionAdded {
                    document_id: doc.id.clone(),
                    version,
                })
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %id,
            version = %document.version,
            "Document version added"
        );
        Ok(document)
    }

    /// The document's version history, oldest first.
    pub async fn history(
        &self,
        ctx: &RequestContext,
        id: &DocumentId,
    ) -> Result<Vec<VersionEntry>, AppError> {
        authorize(&self.rbac, ctx, Capability::ViewDocuments)?;
        let document = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document '{id}' not found")))?;
        ctx.require_project(&document.project_id)?;
        Ok(document.version_history)
    }
}
