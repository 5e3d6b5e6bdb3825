//! Role-to-capability mapping definitions.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use pmis_entity::user::UserRole;

/// A dashboard capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    // Dashboard views
    /// Programme overview dashboard.
    ViewDashboard,
    /// Schedule / Gantt view.
    ViewSchedule,
    /// Budget and cost view.
    ViewBudget,
    /// Risk register.
    ViewRisks,
    /// GIS and 3D views.
    ViewGis,

    // EDMS
    /// Browse and search documents.
    ViewDocuments,
    /// Upload new documents and versions.
    UploadDocument,
    /// Rename, retag, and submit documents.
    EditDocument,
    /// Delete documents.
    DeleteDocument,
    /// Comment on documents and request revisions.
    ReviewDocument,
    /// Approve or reject documents.
    ApproveDocument,

    // Administration
    /// Manage users and roles.
    ManageUsers,
}

impl Capability {
    /// Every capability.
    pub const ALL: [Capability; 12] = [
        Self::ViewDashboard,
        Self::ViewSchedule,
        Self::ViewBudget,
        Self::ViewRisks,
        Self::ViewGis,
        Self::ViewDocuments,
        Self::UploadDocument,
        Self::EditDocument,
        Self::DeleteDocument,
        Self::ReviewDocument,
        Self::ApproveDocument,
        Self::ManageUsers,
    ];

    /// Return the capability as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "view_dashboard",
            Self::ViewSchedule => "view_schedule",
            Self::ViewBudget => "view_budget",
            Self::ViewRisks => "view_risks",
            Self::ViewGis => "view_gis",
            Self::ViewDocuments => "view_documents",
            Self::UploadDocument => "upload_document",
            Self::EditDocument => "edit_document",
            Self::DeleteDocument => "delete_document",
            Self::ReviewDocument => "review_document",
            Self::ApproveDocument => "approve_document",
            Self::ManageUsers => "manage_users",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines the mapping from each role to its set of allowed capabilities.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of capabilities.
    policies: HashMap<UserRole, HashSet<Capability>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Viewer: dashboards and document browsing
        let viewer: HashSet<Capability> = [
            Capability::ViewDashboard,
            Capability::ViewSchedule,
            Capability::ViewDocuments,
            Capability::ViewGis,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Viewer, viewer.clone());

        // Engineer: viewer + upload, edit, review
        let mut engineer = viewer;
        engineer.insert(Capability::ViewRisks);
        engineer.insert(Capability::UploadDocument);
        engineer.insert(Capability::EditDocument);
        engineer.insert(Capability::ReviewDocument);
        policies.insert(UserRole::Engineer, engineer.clone());

        // Project manager: engineer + budget, approval, delete
        let mut project_manager = engineer;
        project_manager.insert(Capability::ViewBudget);
        project_manager.insert(Capability::ApproveDocument);
        project_manager.insert(Capability::DeleteDocument);
        policies.insert(UserRole::ProjectManager, project_manager.clone());

        // Programme manager: same document rights across every project
        policies.insert(UserRole::ProgramManager, project_manager);

        // Admin: everything
        let admin: HashSet<Capability> = Capability::ALL.into_iter().collect();
        policies.insert(UserRole::Admin, admin);

        Self { policies }
    }

    /// Returns the set of capabilities for the given role.
    pub fn capabilities_for_role(&self, role: &UserRole) -> HashSet<Capability> {
        self.policies.get(role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified capability.
    pub fn has_permission(&self, role: &UserRole, capability: &Capability) -> bool {
        self.policies
            .get(role)
            .map(|caps| caps.contains(capability))
            .unwrap_or(false)
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_everything() {
        let policies = RbacPolicies::new();
        for cap in Capability::ALL {
            assert!(policies.has_permission(&UserRole::Admin, &cap), "{cap}");
        }
    }

    #[test]
    fn test_viewer_is_read_only() {
        let policies = RbacPolicies::new();
        assert!(policies.has_permission(&UserRole::Viewer, &Capability::ViewDocuments));
        assert!(!policies.has_permission(&UserRole::Viewer, &Capability::UploadDocument));
        assert!(!policies.has_permission(&UserRole::Viewer, &Capability::ApproveDocument));
    }

    #[test]
    fn test_roles_are_monotonic() {
        let policies = RbacPolicies::new();
        for pair in UserRole::ALL.windows(2) {
            let higher = policies.capabilities_for_role(&pair[0]);
            let lower = policies.capabilities_for_role(&pair[1]);
            assert!(lower.is_subset(&higher), "{} ⊄ {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_engineer_cannot_approve() {
        let policies = RbacPolicies::new();
        assert!(policies.has_permission(&UserRole::Engineer, &Capability::ReviewDocument));
        assert!(!policies.has_permission(&UserRole::Engineer, &Capability::ApproveDocument));
    }
}
