//! Document store and role-checked document use cases.

pub mod noting;
pub mod service;
pub mod store;
pub mod version;

pub use noting::NotingService;
pub use service::DocumentService;
pub use store::DocumentStore;
pub use version::{AddVersionRequest, VersionService};

use tracing::warn;

use pmis_auth::{Capability, RbacEnforcer};
use pmis_core::error::AppError;

use crate::context::RequestContext;

/// Check `capability` for the acting role, logging denials.
pub(crate) fn authorize(
    rbac: &RbacEnforcer,
    ctx: &RequestContext,
    capability: Capability,
) -> Result<(), AppError> {
    rbac.require(&ctx.role, capability).inspect_err(|_| {
        warn!(
            user_id = %ctx.user_id,
            role = %ctx.role,
            capability = %capability,
            "Action denied"
        );
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use pmis_auth::RbacEnforcer;
    use pmis_core::types::ProjectId;
    use pmis_entity::document::{CreateDocument, Discipline, Phase};
    use pmis_entity::project::{Project, ProjectStatus};

    use super::{DocumentService, DocumentStore, NotingService, VersionService};
    use crate::edms::testing::scenario;
    use crate::project::ProjectRegistry;

    pub fn registry() -> ProjectRegistry {
        ProjectRegistry::new(
            [("proj-1", "Harbour Bridge"), ("proj-2", "Metro Line 3")]
                .into_iter()
                .map(|(id, name)| Project {
                    id: ProjectId::new(id),
                    name: name.to_string(),
                    code: id.to_uppercase(),
                    location: None,
                    status: ProjectStatus::Active,
                    manager_id: None,
                    start_date: None,
                    end_date: None,
                })
                .collect(),
        )
    }

    pub fn services() -> (DocumentService, NotingService, VersionService, Arc<DocumentStore>) {
        let store = Arc::new(DocumentStore::with_documents(scenario(), 16).unwrap());
        let rbac = RbacEnforcer::new();
        (
            DocumentService::new(Arc::clone(&store), Arc::new(registry()), rbac.clone()),
            NotingService::new(Arc::clone(&store), rbac.clone()),
            VersionService::new(Arc::clone(&store), rbac),
            store,
        )
    }

    pub fn create_request(name: &str, project: &str) -> CreateDocument {
        CreateDocument {
            name: name.to_string(),
            doc_type: "Drawing".to_string(),
            mime_type: "application/pdf".to_string(),
            category: "Structural".to_string(),
            discipline: Discipline::Civil,
            phase: Phase::Design,
            project_id: ProjectId::new(project),
            tags: BTreeSet::new(),
            description: None,
            size_bytes: 2048,
        }
    }
}
