//! Integration tests for the document workflow: upload, review, approval,
//! versioning, deletion, and explorer refresh.

mod helpers;

use helpers::TestApp;
use pmis_core::error::ErrorKind;
use pmis_core::events::DocumentEvent;
use pmis_core::types::{DocumentId, ProjectId};
use pmis_entity::document::{CreateDocument, Discipline, DocumentStatus, NotingAction, Phase};
use pmis_entity::folder::FolderKey;
use pmis_service::document::AddVersionRequest;

fn upload_request(name: &str, project: &str) -> CreateDocument {
    CreateDocument {
        name: name.to_string(),
        doc_type: "Report".to_string(),
        mime_type: "application/pdf".to_string(),
        category: "Inspection".to_string(),
        discipline: Discipline::Civil,
        phase: Phase::Closure,
        project_id: ProjectId::new(project),
        tags: [" bearing ", "", "inspection"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        description: Some("Post-works bearing inspection".to_string()),
        size_bytes: 4096,
    }
}

#[tokio::test]
async fn test_upload_review_and_approve() {
    let app = TestApp::new();
    let engineer = app.login("mei").await;
    let manager = app.login("asha").await;

    let uploaded = app
        .state
        .documents
        .upload(&engineer, upload_request("Bearing Inspection.pdf", "proj-1"))
        .await
        .unwrap();
    assert_eq!(uploaded.status, DocumentStatus::Draft);
    assert_eq!(uploaded.version, "1.0");
    assert_eq!(uploaded.version_history.len(), 1);
    assert!(uploaded.tags.contains("bearing"));
    assert!(!uploaded.tags.contains(""));

    let submitted = app
        .state
        .documents
        .submit_for_approval(&engineer, &uploaded.id)
        .await
        .unwrap();
    assert_eq!(submitted.status, DocumentStatus::PendingApproval);

    let revised = app
        .state
        .noting
        .add_noting(&manager, &uploaded.id, NotingAction::RequestRevision, "Add photos")
        .await
        .unwrap();
    assert_eq!(revised.status, DocumentStatus::UnderReview);

    let versioned = app
        .state
        .versions
        .add_version(
            &engineer,
            &uploaded.id,
            AddVersionRequest {
                change_note: Some("Photos added".to_string()),
                size_bytes: 8192,
            },
        )
        .await
        .unwrap();
    assert_eq!(versioned.version, "1.1");
    assert_eq!(versioned.status, DocumentStatus::Draft);
    assert_eq!(versioned.size_bytes, 8192);

    app.state
        .documents
        .submit_for_approval(&engineer, &uploaded.id)
        .await
        .unwrap();
    let approved = app
        .state
        .noting
        .add_noting(&manager, &uploaded.id, NotingAction::Approve, "")
        .await
        .unwrap();
    assert_eq!(approved.status, DocumentStatus::Approved);
    assert_eq!(approved.noting_sheet.len(), 2);

    let again = app
        .state
        .noting
        .add_noting(&manager, &uploaded.id, NotingAction::Reject, "Too late")
        .await
        .unwrap_err();
    assert_eq!(again.kind, ErrorKind::Validation);

    let history = app.state.versions.history(&engineer, &uploaded.id).await.unwrap();
    let labels: Vec<&str> = history.iter().map(|v| v.version.as_str()).collect();
    assert_eq!(labels, vec!["1.0", "1.1"]);
}

#[tokio::test]
async fn test_roles_and_project_scope_are_enforced() {
    let app = TestApp::new();
    let viewer = app.login("viewer").await;
    let engineer = app.login("lucas").await;
    let metro_manager = app.login("daniel").await;

    let err = app
        .state
        .documents
        .upload(&viewer, upload_request("Notes.pdf", "proj-1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .state
        .noting
        .add_noting(&engineer, &DocumentId::new("d2"), NotingAction::Approve, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .state
        .noting
        .add_noting(&metro_manager, &DocumentId::new("d2"), NotingAction::Approve, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let d2 = app.state.documents.get(&engineer, &DocumentId::new("d2")).await.unwrap();
    assert_eq!(d2.status, DocumentStatus::PendingApproval);
    assert!(d2.noting_sheet.is_empty());
}

#[tokio::test]
async fn test_documents_outside_assigned_projects_stay_hidden() {
    let app = TestApp::new();
    let metro_manager = app.login("daniel").await;
    let hidden = DocumentId::new("d1");

    let visible = app.documents(&metro_manager).await;
    assert!(!helpers::ids(&visible).contains(&"d1"));

    let err = app.state.documents.get(&metro_manager, &hidden).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    let err = app
        .state
        .noting
        .noting_sheet(&metro_manager, &hidden)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    let err = app
        .state
        .versions
        .history(&metro_manager, &hidden)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let own = &visible[0];
    assert!(app.state.documents.get(&metro_manager, &own.id).await.is_ok());
    assert!(app.state.versions.history(&metro_manager, &own.id).await.is_ok());
}

#[tokio::test]
async fn test_invalid_requests_are_rejected() {
    let app = TestApp::new();
    let manager = app.login("asha").await;

    let err = app
        .state
        .noting
        .add_noting(&manager, &DocumentId::new("d2"), NotingAction::Reject, "   ")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .state
        .documents
        .submit_for_approval(&manager, &DocumentId::new("d1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let err = app
        .state
        .documents
        .upload(&manager, upload_request("Orphan.pdf", "proj-9"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .state
        .documents
        .rename(&manager, &DocumentId::new("d99"), "Ghost.pdf")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    assert_eq!(app.state.store.snapshot().await.1, 0);
}

#[tokio::test]
async fn test_mutations_publish_events_with_revisions() {
    let app = TestApp::new();
    let mut events = app.state.store.subscribe();
    let engineer = app.login("mei").await;

    let uploaded = app
        .state
        .documents
        .upload(&engineer, upload_request("Bearing Inspection.pdf", "proj-1"))
        .await
        .unwrap();
    app.state
        .documents
        .rename(&engineer, &uploaded.id, "Bearing Inspection rev A.pdf")
        .await
        .unwrap();

    let first = events.recv().await.unwrap();
    assert_eq!(first.revision, 1);
    assert_eq!(first.actor_id, Some(engineer.user_id.clone()));
    assert!(matches!(first.payload, DocumentEvent::Created { .. }));

    let second = events.recv().await.unwrap();
    assert_eq!(second.revision, 2);
    assert!(matches!(second.payload, DocumentEvent::Updated { .. }));
}

#[tokio::test]
async fn test_explorer_follows_store_changes() {
    let app = TestApp::new();
    let admin = app.login("admin").await;
    let (mut explorer, _) = app.state.open_explorer(&admin).await.unwrap();
    let revision = explorer.revision();

    app.state.refresh_explorer(&admin, &mut explorer).await.unwrap();
    assert_eq!(explorer.revision(), revision);

    assert!(explorer.navigate_to_id("proj-0-Closure-General"));
    explorer.select(DocumentId::new("d13"), false);

    app.state
        .documents
        .delete(&admin, &DocumentId::new("d13"))
        .await
        .unwrap();
    let documents = app.state.refresh_explorer(&admin, &mut explorer).await.unwrap();

    assert_ne!(explorer.revision(), revision);
    assert!(explorer.path().is_root());
    assert!(explorer.selection().is_empty());
    assert!(explorer.tree().get_key(&FolderKey::project("proj-0")).is_none());
    assert_eq!(explorer.tree().total_documents(), documents.len() as u64);

    let uploaded = app
        .state
        .documents
        .upload(&admin, upload_request("Bearing Inspection.pdf", "proj-1"))
        .await
        .unwrap();
    app.state.refresh_explorer(&admin, &mut explorer).await.unwrap();
    let folder = explorer
        .tree()
        .get_key(&uploaded.folder_key())
        .expect("new discipline folder");
    assert_eq!(folder.document_count, 1);
    assert_eq!(folder.name, "Civil");
}
