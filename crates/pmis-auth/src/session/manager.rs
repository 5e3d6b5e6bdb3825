//! Session lifecycle manager: login and logout.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use pmis_core::config::auth::AuthConfig;
use pmis_core::error::AppError;
use pmis_core::types::UserId;
use pmis_entity::user::{User, UserRole};

use super::directory::UserDirectory;
use crate::rbac::{Capability, RbacPolicies};

/// An active login.
///
/// The capability set is computed once when the session starts and is
/// consulted as a pure predicate afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Session identifier.
    pub id: Uuid,
    /// The logged-in user.
    pub user: User,
    /// Capabilities granted by the user's role.
    pub capabilities: BTreeSet<Capability>,
    /// Whether the user was not found in the directory.
    pub guest: bool,
    /// When the session started.
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// The user's role.
    pub fn role(&self) -> UserRole {
        self.user.role
    }

    /// Whether the session grants `capability`.
    pub fn has_permission(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Manages login sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Known users.
    directory: Arc<UserDirectory>,
    /// Role policies.
    policies: RbacPolicies,
    /// Auth configuration.
    config: AuthConfig,
    /// Active sessions by id.
    active: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(directory: Arc<UserDirectory>, policies: RbacPolicies, config: AuthConfig) -> Self {
        Self {
            directory,
            policies,
            config,
            active: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Logs a user in by username.
    ///
    /// Unknown usernames fail unless guest logins are enabled, in which case
    /// a guest user with the configured role is synthesised.
    pub async fn login(&self, username: &str) -> Result<Session, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }

        let (user, guest) = match self.directory.find_by_username(username) {
            Some(user) => (user.clone(), false),
            None if self.config.allow_guest => (self.guest_user(username)?, true),
            None => {
                warn!(username = %username, "Login rejected: unknown user");
                return Err(AppError::authentication(format!(
                    "Unknown user '{username}'"
                )));
            }
        };

        let session = Session {
            id: Uuid::new_v4(),
            capabilities: self
                .policies
                .capabilities_for_role(&user.role)
                .into_iter()
                .collect(),
            user,
            guest,
            started_at: Utc::now(),
        };

        self.active.write().await.insert(session.id, session.clone());

        info!(
            session_id = %session.id,
            username = %session.user.username,
            role = %session.user.role,
            guest,
            "User logged in"
        );

        Ok(session)
    }

    /// Ends a session. Returns `true` if it was active.
    pub async fn logout(&self, session_id: Uuid) -> bool {
        let removed = self.active.write().await.remove(&session_id);
        if let Some(session) = &removed {
            info!(
                session_id = %session_id,
                username = %session.user.username,
                "User logged out"
            );
        }
        removed.is_some()
    }

    /// Looks up an active session.
    pub async fn get(&self, session_id: Uuid) -> Option<Session> {
        self.active.read().await.get(&session_id).cloned()
    }

    /// Number of active sessions.
    pub async fn active_count(&self) -> usize {
        self.active.read().await.len()
    }

    /// The user directory backing this manager.
    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    fn guest_user(&self, username: &str) -> Result<User, AppError> {
        let role: UserRole = self.config.guest_role.parse()?;
        Ok(User {
            id: UserId::new(format!("guest-{}", username.to_lowercase())),
            username: username.to_string(),
            display_name: format!("{username} (guest)"),
            role,
            email: None,
            department: None,
            projects: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmis_core::error::ErrorKind;

    fn directory() -> Arc<UserDirectory> {
        Arc::new(UserDirectory::new(vec![
            User {
                id: UserId::new("u1"),
                username: "asha".to_string(),
                display_name: "Asha Rao".to_string(),
                role: UserRole::ProjectManager,
                email: None,
                department: None,
                projects: Vec::new(),
            },
            User {
                id: UserId::new("u2"),
                username: "viewer".to_string(),
                display_name: "Read Only".to_string(),
                role: UserRole::Viewer,
                email: None,
                department: None,
                projects: Vec::new(),
            },
        ]))
    }

    #[tokio::test]
    async fn test_login_freezes_capabilities() {
        let manager = SessionManager::new(directory(), RbacPolicies::new(), AuthConfig::default());
        let session = manager.login("ASHA").await.unwrap();
        assert_eq!(session.role(), UserRole::ProjectManager);
        assert!(session.has_permission(Capability::ApproveDocument));
        assert!(!session.has_permission(Capability::ManageUsers));
        assert!(!session.guest);
        assert_eq!(manager.active_count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_user_rejected_without_guest() {
        let manager = SessionManager::new(directory(), RbacPolicies::new(), AuthConfig::default());
        let err = manager.login("mallory").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_guest_login() {
        let config = AuthConfig {
            allow_guest: true,
            ..AuthConfig::default()
        };
        let manager = SessionManager::new(directory(), RbacPolicies::new(), config);
        let session = manager.login("visitor").await.unwrap();
        assert!(session.guest);
        assert_eq!(session.role(), UserRole::Viewer);
        assert!(!session.has_permission(Capability::UploadDocument));
    }

    #[tokio::test]
    async fn test_logout() {
        let manager = SessionManager::new(directory(), RbacPolicies::new(), AuthConfig::default());
        let session = manager.login("viewer").await.unwrap();
        assert!(manager.get(session.id).await.is_some());
        assert!(manager.logout(session.id).await);
        assert!(!manager.logout(session.id).await);
        assert!(manager.get(session.id).await.is_none());
    }
}
