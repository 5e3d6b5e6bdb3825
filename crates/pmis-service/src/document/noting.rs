//! Noting sheet: the review and approval workflow.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use pmis_auth::{Capability, RbacEnforcer};
use pmis_core::error::AppError;
use pmis_core::events::DocumentEvent;
use pmis_core::traits::Repository;
use pmis_core::types::{DocumentId, NotingEntryId};
use pmis_entity::document::{Document, NotingAction, NotingEntry};

use super::authorize;
use super::store::DocumentStore;
use crate::context::RequestContext;

/// Records comments and approval decisions on documents.
#[derive(Debug, Clone)]
pub struct NotingService {
    /// Document store.
    store: Arc<DocumentStore>,
    /// Role enforcement.
    rbac: RbacEnforcer,
}

impl NotingService {
    /// Creates a new noting service.
    pub fn new(store: Arc<DocumentStore>, rbac: RbacEnforcer) -> Self {
        Self { store, rbac }
    }

    /// Appends an entry to the document's noting sheet and applies the
    /// status change the action implies.
    ///
    /// Approving or rejecting requires the approve capability and an
    /// undecided document. Comments and revision requests require the
    /// review capability. Only approvals may omit the remark.
    pub async fn add_noting(
        &self,
        ctx: &RequestContext,
        id: &DocumentId,
        action: NotingAction,
        remark: &str,
    ) -> Result<Document, AppError> {
        let capability = match action {
            NotingAction::Approve | NotingAction::Reject => Capability::ApproveDocument,
            NotingAction::Comment | NotingAction::RequestRevision => Capability::ReviewDocument,
        };
        authorize(&self.rbac, ctx, capability)?;

        let remark = remark.trim();
        if remark.is_empty() && action != NotingAction::Approve {
            return Err(AppError::validation(format!(
                "A remark is required to {}",
                action.as_str().replace('_', " ")
            )));
        }

        let document = self
            .store
            .modify(Some(&ctx.user_id), id, |doc| {
                ctx.require_project(&doc.project_id)?;
                if matches!(action, NotingAction::Approve | NotingAction::Reject)
                    && doc.status.is_decided()
                {
                    return Err(AppError::validation(format!(
                        "Document '{}' is already {}",
                        doc.id, doc.status
                    )));
                }

                doc.noting_sheet.push(NotingEntry {
                    id: NotingEntryId::generate(),
                    author_id: ctx.user_id.clone(),
                    author_name: ctx.display_name.clone(),
                    author_role: ctx.role,
                    action,
                    remark: remark.to_string(),
                    created_at: Utc::now(),
                });
                if let Some(status) = action.resulting_status() {
                    doc.status = status;
                }
                Ok(DocumentEvent::Noted {
                    document_id: doc.id.clone(),
                    action: action.as_str().to_string(),
                })
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %id,
            action = %action,
            status = %document.status,
            "Noting recorded"
        );
        Ok(document)
    }

    /// The document's noting sheet, oldest first.
    pub async fn noting_sheet(
        &self,
        ctx: &RequestContext,
        id: &DocumentId,
    ) -> Result<Vec<NotingEntry>, AppError> {
        authorize(&self.rbac, ctx, Capability::ViewDocuments)?;
        let document = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document '{id}' not found")))?;
        ctx.require_project(&document.project_id)?;
        Ok(document.noting_sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::testing::services;
    use crate::edms::testing::context;
    use pmis_core::error::ErrorKind;
    use pmis_entity::document::DocumentStatus;
    use pmis_entity::user::UserRole;

    #[tokio::test]
    async fn test_approval_cycle() {
        let (docs, noting, _, _) = services();
        let engineer = context(UserRole::Engineer);
        let manager = context(UserRole::ProjectManager);
        let id = DocumentId::new("d1");

        docs.submit_for_approval(&engineer, &id).await.unwrap();
        let doc = noting
            .add_noting(&engineer, &id, NotingAction::RequestRevision, "Check pier loads")
            .await
            .unwrap();
        assert_eq!(doc.status, DocumentStatus::UnderReview);

        docs.submit_for_approval(&engineer, &id).await.unwrap();
        let doc = noting
            .add_noting(&manager, &id, NotingAction::Approve, "")
            .await
            .unwrap();
        assert_eq!(doc.status, DocumentStatus::Approved);

        let sheet = noting.noting_sheet(&context(UserRole::Viewer), &id).await.unwrap();
        let actions: Vec<NotingAction> = sheet.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![NotingAction::RequestRevision, NotingAction::Approve]);
        assert_eq!(sheet[1].author_role, UserRole::ProjectManager);
        assert_eq!(sheet[1].author_name, manager.display_name);
    }

    #[tokio::test]
    async fn test_decided_document_cannot_be_decided_again() {
        let (_, noting, _, _) = services();
        let manager = context(UserRole::ProjectManager);
        let id = DocumentId::new("d2");

        noting
            .add_noting(&manager, &id, NotingAction::Reject, "Wrong cable schedule")
            .await
            .unwrap();
        let err = noting
            .add_noting(&manager, &id, NotingAction::Approve, "")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let doc = noting
            .add_noting(&manager, &id, NotingAction::Comment, "Resubmit with rev B")
            .await
            .unwrap();
        assert_eq!(doc.status, DocumentStatus::Rejected);
        assert_eq!(doc.noting_sheet.len(), 2);
    }

    #[tokio::test]
    async fn test_capabilities_per_action() {
        let (_, noting, _, _) = services();
        let id = DocumentId::new("d1");

        let err = noting
            .add_noting(&context(UserRole::Engineer), &id, NotingAction::Approve, "ok")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = noting
            .add_noting(&context(UserRole::Viewer), &id, NotingAction::Comment, "hi")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_remark_required() {
        let (_, noting, _, store) = services();
        let err = noting
            .add_noting(
                &context(UserRole::ProjectManager),
                &DocumentId::new("d1"),
                NotingAction::Reject,
                "   ",
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.snapshot().await.1, 0);
    }
}
