//! Request context carrying the acting user, session, and resolved capabilities.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use pmis_auth::{Capability, Session};
use pmis_core::error::AppError;
use pmis_core::types::{ProjectId, UserId};
use pmis_entity::user::UserRole;

/// Context for the current operation.
///
/// Built from a [`Session`] and passed into service methods so that every
/// operation knows *who* is acting and what they may do.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The session the request belongs to.
    pub session_id: Uuid,
    /// The user's role when the session started.
    pub role: UserRole,
    /// Login name.
    pub username: String,
    /// Display name, recorded on noting sheet entries.
    pub display_name: String,
    /// Capabilities frozen at login.
    pub capabilities: BTreeSet<Capability>,
    /// Projects the user is assigned to. Empty means programme-wide.
    pub projects: Vec<ProjectId>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Build a context for a request made within `session`.
    pub fn from_session(session: &Session) -> Self {
        Self {
            user_id: session.user.id.clone(),
            session_id: session.id,
            role: session.user.role,
            username: session.user.username.clone(),
            display_name: session.user.display_name.clone(),
            capabilities: session.capabilities.clone(),
            projects: session.user.projects.clone(),
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the context grants `capability`.
    pub fn has_permission(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Whether the user may act on documents of `project_id`.
    pub fn can_access_project(&self, project_id: &ProjectId) -> bool {
        self.projects.is_empty() || self.is_admin() || self.projects.contains(project_id)
    }

    /// Fail with an authorization error unless the project is in scope.
    pub fn require_project(&self, project_id: &ProjectId) -> Result<(), AppError> {
        if self.can_access_project(project_id) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "User '{}' is not assigned to project '{}'",
                self.username, project_id
            )))
        }
    }
}
