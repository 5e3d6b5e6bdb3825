//! Shared test helpers for integration tests.

#![allow(dead_code)]

use pmis_core::config::AppConfig;
use pmis_entity::document::Document;
use pmis_service::{AppState, RequestContext};

/// Test application context
pub struct TestApp {
    /// Application state over the embedded seed
    pub state: AppState,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over the embedded seed
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::bootstrap(config.clone()).expect("Failed to bootstrap state");
        Self { state, config }
    }

    /// Log in as a seeded user
    pub async fn login(&self, username: &str) -> RequestContext {
        self.state
            .login(username)
            .await
            .unwrap_or_else(|e| panic!("Login as '{}' failed: {}", username, e))
    }

    /// Documents visible to `ctx`
    pub async fn documents(&self, ctx: &RequestContext) -> Vec<Document> {
        let (documents, _) = self
            .state
            .documents
            .list(ctx)
            .await
            .expect("Failed to list documents");
        documents
    }
}

/// Ids of `documents`, in order
pub fn ids(documents: &[Document]) -> Vec<&str> {
    documents.iter().map(|d| d.id.as_str()).collect()
}
