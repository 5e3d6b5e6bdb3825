//! Document CRUD and submission with role enforcement.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use pmis_auth::{Capability, RbacEnforcer};
use pmis_core::error::AppError;
use pmis_core::events::DocumentEvent;
use pmis_core::traits::Repository;
use pmis_core::types::DocumentId;
use pmis_entity::document::{CreateDocument, Document, DocumentStatus};

use super::authorize;
use super::store::DocumentStore;
use crate::context::RequestContext;
use crate::project::ProjectRegistry;

/// Manages document records on behalf of logged-in users.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document store.
    store: Arc<DocumentStore>,
    /// Known projects.
    projects: Arc<ProjectRegistry>,
    /// Role enforcement.
    rbac: RbacEnforcer,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(store: Arc<DocumentStore>, projects: Arc<ProjectRegistry>, rbac: RbacEnforcer) -> Self {
        Self {
            store,
            projects,
            rbac,
        }
    }

    /// Gets a document by ID.
    pub async fn get(&self, ctx: &RequestContext, id: &DocumentId) -> Result<Document, AppError> {
        authorize(&self.rbac, ctx, Capability::ViewDocuments)?;
        let document = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document '{id}' not found")))?;
        ctx.require_project(&document.project_id)?;
        Ok(document)
    }

    /// Lists every document the user may browse, in store order, with the
    /// store revision the list reflects.
    pub async fn list(&self, ctx: &RequestContext) -> Result<(Vec<Document>, u64), AppError> {
        authorize(&self.rbac, ctx, Capability::ViewDocuments)?;
        let (mut documents, revision) = self.store.snapshot().await;
        documents.retain(|doc| ctx.can_access_project(&doc.project_id));
        Ok((documents, revision))
    }

    /// Uploads a new document as a draft at version 1.0.
    pub async fn upload(&self, ctx: &RequestContext, req: CreateDocument) -> Result<Document, AppError> {
        authorize(&self.rbac, ctx, Capability::UploadDocument)?;

        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Document name cannot be empty"));
        }
        if !self.projects.contains(&req.project_id) {
            return Err(AppError::validation(format!(
                "Unknown project '{}'",
                req.project_id
            )));
        }
        ctx.require_project(&req.project_id)?;

        let req = CreateDocument {
            name: name.to_string(),
            tags: normalize_tags(req.tags),
            ..req
        };
        let document = req.into_document(ctx.user_id.clone(), ctx.role);
        let document = self.store.insert(Some(&ctx.user_id), document).await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            project_id = %document.project_id,
            "Document uploaded"
        );
        Ok(document)
    }

    /// Renames a document.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        id: &DocumentId,
        new_name: &str,
    ) -> Result<Document, AppError> {
        authorize(&self.rbac, ctx, Capability::EditDocument)?;

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppError::validation("Document name cannot be empty"));
        }

        let document = self
            .store
            .modify(Some(&ctx.user_id), id, |doc| {
                ctx.require_project(&doc.project_id)?;
                doc.name = new_name.to_string();
                Ok(DocumentEvent::Updated {
                    document_id: doc.id.clone(),
                })
            })
            .await?;

        info!(user_id = %ctx.user_id, document_id = %id, new_name = %new_name, "Document renamed");
        Ok(document)
    }

    /// Replaces a document's tag set. Tags are trimmed; blank tags dropped.
    pub async fn update_tags(
        &self,
        ctx: &RequestContext,
        id: &DocumentId,
        tags: BTreeSet<String>,
    ) -> Result<Document, AppError> {
        authorize(&self.rbac, ctx, Capability::EditDocument)?;

        let tags = normalize_tags(tags);
        let document = self
            .store
            .modify(Some(&ctx.user_id), id, |doc| {
                ctx.require_project(&doc.project_id)?;
                doc.tags = tags;
                Ok(DocumentEvent::Updated {
                    document_id: doc.id.clone(),
                })
            })
            .await?;

        info!(user_id = %ctx.user_id, document_id = %id, tags = document.tags.len(), "Document tags updated");
        Ok(document)
    }

    /// Submits a draft, rejected, or returned document for approval.
    pub async fn submit_for_approval(
        &self,
        ctx: &RequestContext,
        id: &DocumentId,
    ) -> Result<Document, AppError> {
        authorize(&self.rbac, ctx, Capability::EditDocument)?;

        let document = self
            .store
            .modify(Some(&ctx.user_id), id, |doc| {
                ctx.require_project(&doc.project_id)?;
                if !doc.status.can_submit() {
                    return Err(AppError::conflict(format!(
                        "Document '{}' cannot be submitted while {}",
                        doc.id, doc.status
                    )));
                }
                doc.status = DocumentStatus::PendingApproval;
                Ok(DocumentEvent::Updated {
                    document_id: doc.id.clone(),
                })
            })
            .await?;

        info!(user_id = %ctx.user_id, document_id = %id, "Document submitted for approval");
        Ok(document)
    }

    /// Deletes a document, returning the removed record.
    pub async fn delete(&self, ctx: &RequestContext, id: &DocumentId) -> Result<Document, AppError> {
        authorize(&self.rbac, ctx, Capability::DeleteDocument)?;

        let existing = self.get(ctx, id).await?;
        ctx.require_project(&existing.project_id)?;
        let removed = self.store.remove(Some(&ctx.user_id), id).await?;

        info!(user_id = %ctx.user_id, document_id = %id, name = %removed.name, "Document deleted");
        Ok(removed)
    }
}

fn normalize_tags(tags: BTreeSet<String>) -> BTreeSet<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::testing::{create_request, services};
    use crate::edms::testing::{context, scoped_context};
    use pmis_core::error::ErrorKind;
    use pmis_core::types::ProjectId;
    use pmis_entity::user::UserRole;

    #[tokio::test]
    async fn test_upload_creates_draft() {
        let (docs, _, _, store) = services();
        let engineer = context(UserRole::Engineer);
        let doc = docs
            .upload(&engineer, create_request("  Pier Layout.dwg ", "proj-1"))
            .await
            .unwrap();

        assert_eq!(doc.name, "Pier Layout.dwg");
        assert_eq!(doc.status, DocumentStatus::Draft);
        assert_eq!(doc.version, "1.0");
        assert!(doc.is_latest_version);
        assert_eq!(doc.version_history.len(), 1);
        assert_eq!(doc.uploaded_by, engineer.user_id);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_upload_validation() {
        let (docs, _, _, _) = services();
        let engineer = context(UserRole::Engineer);

        let err = docs.upload(&engineer, create_request("  ", "proj-1")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = docs
            .upload(&engineer, create_request("Plan.pdf", "proj-404"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = docs
            .upload(&context(UserRole::Viewer), create_request("Plan.pdf", "proj-1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_project_scope_enforced() {
        let (docs, _, _, _) = services();
        let mut scoped = context(UserRole::Engineer);
        scoped.projects = vec![ProjectId::new("proj-2")];

        let err = docs
            .rename(&scoped, &DocumentId::new("d1"), "Other")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let (visible, _) = docs.list(&scoped).await.unwrap();
        assert!(visible.is_empty());
    }

    #[tokio::test]
    async fn test_rename_and_tags() {
        let (docs, _, _, _) = services();
        let engineer = context(UserRole::Engineer);
        let id = DocumentId::new("d1");

        let doc = docs.rename(&engineer, &id, "Bridge Plan rev A").await.unwrap();
        assert_eq!(doc.name, "Bridge Plan rev A");

        let tags = [" deck ", "", "structural"].map(String::from).into_iter().collect();
        let doc = docs.update_tags(&engineer, &id, tags).await.unwrap();
        let tags: Vec<&str> = doc.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["deck", "structural"]);
    }

    #[tokio::test]
    async fn test_submit_transitions() {
        let (docs, _, _, _) = services();
        let engineer = context(UserRole::Engineer);
        let id = DocumentId::new("d1");

        let doc = docs.submit_for_approval(&engineer, &id).await.unwrap();
        assert_eq!(doc.status, DocumentStatus::PendingApproval);

        let err = docs.submit_for_approval(&engineer, &id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_reads_respect_project_scope() {
        let (docs, noting, versions, _) = services();
        let metro = scoped_context(UserRole::Engineer, &["proj-2"]);
        let bridge = scoped_context(UserRole::Engineer, &["proj-1"]);
        let id = DocumentId::new("d1");

        assert!(docs.list(&metro).await.unwrap().0.is_empty());
        let err = docs.get(&metro, &id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        let err = noting.noting_sheet(&metro, &id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        let err = versions.history(&metro, &id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        assert_eq!(docs.get(&bridge, &id).await.unwrap().name, "Bridge Plan");
        assert!(noting.noting_sheet(&bridge, &id).await.is_ok());
        assert!(versions.history(&bridge, &id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_requires_capability() {
        let (docs, _, _, store) = services();
        let id = DocumentId::new("d2");

        let err = docs.delete(&context(UserRole::Engineer), &id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let removed = docs.delete(&context(UserRole::ProjectManager), &id).await.unwrap();
        assert_eq!(removed.name, "Wiring Diagram");
        assert_eq!(store.count().await.unwrap(), 1);

        let err = docs.get(&context(UserRole::Viewer), &id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
