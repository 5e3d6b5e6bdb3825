//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
///
/// Roles are ordered by privilege level:
/// Admin > ProgramManager > ProjectManager > Engineer > Viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full system administrator.
    Admin,
    /// Oversees every project in the programme.
    ProgramManager,
    /// Runs a single project; approves its documents.
    ProjectManager,
    /// Produces and reviews technical documents.
    Engineer,
    /// Read-only access to dashboards and documents.
    Viewer,
}

impl UserRole {
    /// Every role, most privileged first.
    pub const ALL: [UserRole; 5] = [
        Self::Admin,
        Self::ProgramManager,
        Self::ProjectManager,
        Self::Engineer,
        Self::Viewer,
    ];

    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 5,
            Self::ProgramManager => 4,
            Self::ProjectManager => 3,
            Self::Engineer => 2,
            Self::Viewer => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProgramManager => "program_manager",
            Self::ProjectManager => "project_manager",
            Self::Engineer => "engineer",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = pmis_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "admin" => Ok(Self::Admin),
            "program_manager" => Ok(Self::ProgramManager),
            "project_manager" => Ok(Self::ProjectManager),
            "engineer" => Ok(Self::Engineer),
            "viewer" => Ok(Self::Viewer),
            _ => Err(pmis_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, program_manager, project_manager, engineer, viewer"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Admin.has_at_least(&UserRole::Viewer));
        assert!(UserRole::Admin.has_at_least(&UserRole::Admin));
        assert!(UserRole::ProgramManager.has_at_least(&UserRole::ProjectManager));
        assert!(!UserRole::Viewer.has_at_least(&UserRole::Engineer));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("VIEWER".parse::<UserRole>().unwrap(), UserRole::Viewer);
        assert_eq!(
            "project-manager".parse::<UserRole>().unwrap(),
            UserRole::ProjectManager
        );
        assert!("invalid".parse::<UserRole>().is_err());
    }
}
