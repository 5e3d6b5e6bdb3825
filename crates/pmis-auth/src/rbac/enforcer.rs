//! RBAC enforcement: checks whether a role holds a capability.

use pmis_core::error::AppError;
use pmis_entity::user::UserRole;

use super::policies::{Capability, RbacPolicies};

/// Enforces role-based access control for dashboard and EDMS operations.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Checks whether the given role has the required capability.
    ///
    /// Returns `Ok(())` if allowed, or an authorization error if denied.
    pub fn require(&self, role: &UserRole, capability: Capability) -> Result<(), AppError> {
        if self.policies.has_permission(role, &capability) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' does not have capability '{capability}'"
            )))
        }
    }

    /// Checks whether the role has the capability (returns bool).
    pub fn has_permission(&self, role: &UserRole, capability: Capability) -> bool {
        self.policies.has_permission(role, &capability)
    }

    /// Checks whether the given role is at least the specified minimum role.
    pub fn require_minimum_role(
        &self,
        actual_role: &UserRole,
        minimum_role: &UserRole,
    ) -> Result<(), AppError> {
        if actual_role.has_at_least(minimum_role) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{actual_role}' is insufficient; minimum required: '{minimum_role}'"
            )))
        }
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmis_core::error::ErrorKind;

    #[test]
    fn test_require_denies_with_authorization_error() {
        let enforcer = RbacEnforcer::new();
        let err = enforcer
            .require(&UserRole::Viewer, Capability::DeleteDocument)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(err.message.contains("delete_document"));
    }

    #[test]
    fn test_minimum_role() {
        let enforcer = RbacEnforcer::new();
        assert!(enforcer
            .require_minimum_role(&UserRole::ProgramManager, &UserRole::ProjectManager)
            .is_ok());
        assert!(enforcer
            .require_minimum_role(&UserRole::Engineer, &UserRole::ProjectManager)
            .is_err());
    }
}
