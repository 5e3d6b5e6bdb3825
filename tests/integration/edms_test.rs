//! Integration tests for the folder tree, path resolution, and filtering
//! over the bundled seed.

mod helpers;

use helpers::{TestApp, ids};
use pmis_entity::folder::{FolderKey, FolderKind, ROOT_ID};
use pmis_service::edms::{FolderPath, apply_filter, breadcrumbs};

#[tokio::test]
async fn test_tree_lists_projects_in_first_seen_order() {
    let app = TestApp::new();
    let ctx = app.login("admin").await;
    let (explorer, documents) = app.state.open_explorer(&ctx).await.unwrap();
    let tree = explorer.tree();

    assert_eq!(tree.root.id, ROOT_ID);
    assert_eq!(tree.root.name, "All Documents");
    assert_eq!(tree.total_documents(), documents.len() as u64);

    let projects: Vec<&str> = tree.root.children.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(projects, vec!["proj-1", "proj-2", "proj-3", "proj-4", "proj-0"]);
    assert_eq!(tree.root.children[0].name, "Harbour Bridge Rehabilitation");
    assert_eq!(tree.root.children[4].name, "Unknown Project");

    let phases: Vec<&str> = tree.root.children[0]
        .children
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(phases, vec!["Design", "Execution", "Planning"]);
}

#[tokio::test]
async fn test_counts_roll_up_and_leaves_are_disciplines() {
    let app = TestApp::new();
    let ctx = app.login("admin").await;
    let (explorer, _) = app.state.open_explorer(&ctx).await.unwrap();

    for node in explorer.tree().walk() {
        if node.children.is_empty() {
            assert_eq!(node.kind(), FolderKind::Discipline, "leaf {}", node.id);
            assert!(node.document_count > 0);
        } else {
            let sum: u64 = node.children.iter().map(|c| c.document_count).sum();
            assert_eq!(node.document_count, sum, "node {}", node.id);
        }
    }
}

#[tokio::test]
async fn test_every_folder_filters_to_its_count() {
    let app = TestApp::new();
    let ctx = app.login("admin").await;
    let (explorer, documents) = app.state.open_explorer(&ctx).await.unwrap();
    let tree = explorer.tree();

    for node in tree.walk() {
        let path = FolderPath::resolve(tree, &node.id);
        assert_eq!(path.selected(), &node.key);
        let matched = apply_filter(&documents, &path, "");
        assert_eq!(matched.len() as u64, node.document_count, "folder {}", node.id);
    }
}

#[tokio::test]
async fn test_search_scenarios() {
    let app = TestApp::new();
    let ctx = app.login("admin").await;
    let documents = app.documents(&ctx).await;
    let root = FolderPath::root();

    assert_eq!(ids(&apply_filter(&documents, &root, "wiring")), vec!["d2"]);
    assert_eq!(ids(&apply_filter(&documents, &root, "OXYGEN")), vec!["d12"]);
    assert!(apply_filter(&documents, &root, "nonexistent-term").is_empty());

    let metro = FolderPath::from_id("proj-2");
    assert_eq!(ids(&apply_filter(&documents, &metro, "pdf")), vec!["d5", "d6"]);

    let civil = FolderPath::from_id("proj-1-Design-Civil");
    assert_eq!(ids(&apply_filter(&documents, &civil, "")), vec!["d1"]);
}

#[tokio::test]
async fn test_unknown_folder_matches_nothing() {
    let app = TestApp::new();
    let ctx = app.login("admin").await;
    let documents = app.documents(&ctx).await;

    assert!(apply_filter(&documents, &FolderPath::from_id("proj-9"), "").is_empty());
    assert!(apply_filter(&documents, &FolderPath::from_id("proj-4-Closure"), "").is_empty());
}

#[tokio::test]
async fn test_breadcrumb_labels() {
    let app = TestApp::new();
    let ctx = app.login("admin").await;
    let (mut explorer, _) = app.state.open_explorer(&ctx).await.unwrap();

    let path = FolderPath::resolve(explorer.tree(), "proj-2-Design-HVAC");
    let labels: Vec<String> = breadcrumbs(explorer.tree(), &path)
        .into_iter()
        .map(|c| c.label)
        .collect();
    assert_eq!(
        labels,
        vec!["All Documents", "Metro Line 3 Extension", "Design", "HVAC"]
    );

    assert!(explorer.navigate_to_id("proj-0-Closure-General"));
    assert_eq!(
        explorer.address_bar(),
        "All Documents / Unknown Project / Closure / General"
    );
    assert!(explorer.navigate_to_crumb(1));
    assert_eq!(explorer.path().selected(), &FolderKey::project("proj-0"));
}

#[tokio::test]
async fn test_project_scoped_user_sees_own_projects() {
    let app = TestApp::new();
    let ctx = app.login("daniel").await;
    let (explorer, documents) = app.state.open_explorer(&ctx).await.unwrap();

    assert!(documents.iter().all(|d| d.project_id.as_str() == "proj-2"));
    let projects: Vec<&str> = explorer
        .tree()
        .root
        .children
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(projects, vec!["proj-2"]);
    assert_eq!(explorer.tree().total_documents(), 5);
}
