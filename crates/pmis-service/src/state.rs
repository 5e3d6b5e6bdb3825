//! Application state: the composition root shared by every front end.

use std::sync::Arc;

use tracing::info;

use pmis_auth::{Capability, RbacEnforcer, RbacPolicies, SessionManager, UserDirectory};
use pmis_core::config::AppConfig;
use pmis_core::result::AppResult;
use pmis_entity::document::Document;

use crate::context::RequestContext;
use crate::document::{DocumentService, DocumentStore, NotingService, VersionService, authorize};
use crate::edms::ExplorerState;
use crate::project::ProjectRegistry;
use crate::report::DocumentStats;
use crate::seed::Seed;

/// Application state containing all shared dependencies.
///
/// Owns the single document store; services hold `Arc` handles to it.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Document record store
    pub store: Arc<DocumentStore>,
    /// Project registry
    pub projects: Arc<ProjectRegistry>,
    /// Login sessions
    pub sessions: Arc<SessionManager>,
    /// Role-based access control enforcer
    pub rbac: RbacEnforcer,
    /// Document CRUD
    pub documents: DocumentService,
    /// Review and approval
    pub noting: NotingService,
    /// Version history
    pub versions: VersionService,
}

impl AppState {
    /// Builds the state from the seed named in `config`, or the embedded one.
    pub fn bootstrap(config: AppConfig) -> AppResult<Self> {
        let seed = Seed::load(config.edms.seed_path.as_deref())?;
        Self::from_seed(config, seed)
    }

    /// Builds the state from an explicit seed.
    pub fn from_seed(config: AppConfig, seed: Seed) -> AppResult<Self> {
        let policies = RbacPolicies::new();
        let rbac = RbacEnforcer::with_policies(policies.clone());

        let store = Arc::new(DocumentStore::with_documents(
            seed.documents,
            config.edms.event_buffer,
        )?);
        let projects = Arc::new(ProjectRegistry::new(seed.projects));
        let directory = Arc::new(UserDirectory::new(seed.users));
        let sessions = Arc::new(SessionManager::new(
            directory,
            policies,
            config.auth.clone(),
        ));

        info!(
            projects = projects.len(),
            users = sessions.directory().len(),
            "Application state initialised"
        );

        Ok(Self {
            documents: DocumentService::new(Arc::clone(&store), Arc::clone(&projects), rbac.clone()),
            noting: NotingService::new(Arc::clone(&store), rbac.clone()),
            versions: VersionService::new(Arc::clone(&store), rbac.clone()),
            config: Arc::new(config),
            store,
            projects,
            sessions,
            rbac,
        })
    }

    /// Logs `username` in and returns the request context for the session.
    pub async fn login(&self, username: &str) -> AppResult<RequestContext> {
        let session = self.sessions.login(username).await?;
        Ok(RequestContext::from_session(&session))
    }

    /// A fresh explorer over the documents visible to `ctx`, with its tree
    /// built, together with those documents.
    pub async fn open_explorer(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<(ExplorerState, Vec<Document>)> {
        let mut explorer = ExplorerState::from_config(&self.config.edms);
        let documents = self.refresh_explorer(ctx, &mut explorer).await?;
        Ok((explorer, documents))
    }

    /// Brings `explorer` up to date with the store and returns the
    /// documents visible to `ctx`.
    pub async fn refresh_explorer(
        &self,
        ctx: &RequestContext,
        explorer: &mut ExplorerState,
    ) -> AppResult<Vec<Document>> {
        let (documents, revision) = self.documents.list(ctx).await?;
        explorer.refresh(&documents, revision, self.projects.as_ref());
        Ok(documents)
    }

    /// Dashboard statistics over the documents visible to `ctx`.
    pub async fn stats(&self, ctx: &RequestContext) -> AppResult<DocumentStats> {
        authorize(&self.rbac, ctx, Capability::ViewDashboard)?;
        let (documents, _) = self.documents.list(ctx).await?;
        Ok(DocumentStats::collect(&documents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmis_core::error::ErrorKind;

    #[tokio::test]
    async fn test_bootstrap_from_embedded_seed() {
        let state = AppState::bootstrap(AppConfig::default()).unwrap();
        let ctx = state.login("admin").await.unwrap();
        let (explorer, documents) = state.open_explorer(&ctx).await.unwrap();
        assert_eq!(explorer.tree().total_documents(), documents.len() as u64);
        assert_eq!(explorer.address_bar(), "All Documents");

        let stats = state.stats(&ctx).await.unwrap();
        assert_eq!(stats.total, documents.len() as u64);
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let state = AppState::bootstrap(AppConfig::default()).unwrap();
        let err = state.login("nobody").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
