//! Integration tests for configuration files and external seeds.

mod helpers;

use std::io::Write;

use helpers::TestApp;
use pmis_core::config::AppConfig;
use pmis_core::config::edms::ViewMode;
use pmis_core::error::ErrorKind;
use pmis_service::{AppState, Seed};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// The embedded seed cut down to the Metro project.
fn metro_seed() -> Seed {
    let mut seed = Seed::embedded().expect("embedded seed");
    seed.projects.retain(|p| p.id.as_str() == "proj-2");
    seed.documents.retain(|d| d.project_id.as_str() == "proj-2");
    seed
}

#[tokio::test]
async fn test_config_file_points_at_external_seed() {
    let seed_file = write_temp(".json", &serde_json::to_string(&metro_seed()).unwrap());
    let config_file = write_temp(
        ".toml",
        &format!(
            "[edms]\nseed_path = {:?}\nroot_label = \"Programme\"\ndefault_view = \"list\"\n",
            seed_file.path().to_str().unwrap()
        ),
    );

    let config = AppConfig::load(config_file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.edms.default_view, ViewMode::List);

    let app = TestApp::with_config(config);
    let ctx = app.login("admin").await;
    let (explorer, documents) = app.state.open_explorer(&ctx).await.unwrap();

    assert_eq!(documents.len(), 5);
    assert_eq!(explorer.view(), ViewMode::List);
    assert_eq!(explorer.address_bar(), "Programme");
    assert_eq!(explorer.tree().root.children.len(), 1);
    assert_eq!(explorer.tree().root.children[0].name, "Metro Line 3 Extension");
}

#[test]
fn test_missing_seed_file_is_a_configuration_error() {
    let mut config = AppConfig::default();
    config.edms.seed_path = Some("does/not/exist/seed.json".to_string());

    let err = AppState::bootstrap(config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[test]
fn test_malformed_seed_is_a_serialization_error() {
    let seed_file = write_temp(".json", "{ \"documents\": [ { \"id\": 1 } ] }");
    let err = Seed::from_path(seed_file.path()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Serialization);
}

#[test]
fn test_duplicate_document_ids_are_rejected() {
    let mut seed = metro_seed();
    let first = seed.documents[0].clone();
    seed.documents.push(first);

    let err = AppState::from_seed(AppConfig::default(), seed).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_guest_login_follows_auth_config() {
    let config_file = write_temp(
        ".toml",
        "[auth]\nallow_guest = true\nguest_role = \"engineer\"\n",
    );
    let config = AppConfig::load(config_file.path().to_str().unwrap()).unwrap();
    let app = TestApp::with_config(config);

    let guest = app.login("visitor").await;
    assert_eq!(guest.role.as_str(), "engineer");
    assert!(guest.projects.is_empty());

    let strict = TestApp::new();
    let err = strict.state.login("visitor").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[test]
fn test_bundled_default_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
    let config = AppConfig::load(path).unwrap();
    assert_eq!(config.edms.root_label, "All Documents");
    assert_eq!(config.edms.unknown_project_label, "Unknown Project");
    assert!(!config.auth.allow_guest);
    assert!(AppState::bootstrap(config).is_ok());
}
