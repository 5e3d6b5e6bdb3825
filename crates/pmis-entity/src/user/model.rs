//! User entity model.

use serde::{Deserialize, Serialize};

use pmis_core::types::{ProjectId, UserId};

use super::role::UserRole;

/// A user known to the programme dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// User role (RBAC).
    pub role: UserRole,
    /// Email address (optional).
    #[serde(default)]
    pub email: Option<String>,
    /// Department or organisation.
    #[serde(default)]
    pub department: Option<String>,
    /// Projects the user is assigned to. Empty means programme-wide.
    #[serde(default)]
    pub projects: Vec<ProjectId>,
}

impl User {
    /// Whether the user works across every project.
    pub fn is_programme_wide(&self) -> bool {
        self.projects.is_empty()
    }
}
