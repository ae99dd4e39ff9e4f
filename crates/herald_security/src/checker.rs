//! Admin access evaluation.

use herald_core::{AccessPolicy, Requester};
use herald_error::AccessError;
use tracing::{debug, instrument};

/// Evaluates whether an acting user satisfies the administrative policy.
///
/// A user has admin access when the intersection of their role names
/// (case-insensitively normalized) with `policy.admin_roles` is non-empty,
/// OR the intersection of their permission names with
/// `policy.admin_permissions` is non-empty. Absence of any role or
/// permission simply yields `false`; evaluation never fails.
///
/// # Examples
///
/// ```
/// use herald_core::{AccessPolicy, Requester};
/// use herald_security::AccessChecker;
///
/// let checker = AccessChecker::new(AccessPolicy::default());
/// let admin = Requester::new(1, "mod", vec!["Admin".to_string()], vec![]);
/// let member = Requester::new(2, "member", vec![], vec![]);
/// assert!(checker.has_admin_access(&admin));
/// assert!(!checker.has_admin_access(&member));
/// ```
#[derive(Debug, Clone)]
pub struct AccessChecker {
    policy: AccessPolicy,
}

impl AccessChecker {
    /// Create a checker for the given process-wide policy.
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    /// The policy this checker was constructed with.
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Whether the requester satisfies the admin policy.
    #[instrument(skip(self, requester), fields(user_id = requester.id))]
    pub fn has_admin_access(&self, requester: &Requester) -> bool {
        let role_match = self.policy.admin_roles.iter().any(|admin_role| {
            let admin_role = admin_role.to_lowercase();
            requester
                .roles
                .iter()
                .any(|role| role.to_lowercase() == admin_role)
        });
        if role_match {
            debug!("Admin access granted via role");
            return true;
        }

        let permission_match = self.policy.admin_permissions.iter().any(|admin_perm| {
            requester
                .permissions
                .iter()
                .any(|perm| perm == admin_perm)
        });
        if permission_match {
            debug!("Admin access granted via permission");
            return true;
        }

        debug!("Admin access denied");
        false
    }

    /// Require admin access for `action`.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` naming the refused action when the requester
    /// satisfies neither list.
    pub fn require_admin(&self, requester: &Requester, action: &str) -> Result<(), AccessError> {
        if self.has_admin_access(requester) {
            Ok(())
        } else {
            Err(AccessError::forbidden(action))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::AccessPolicy;

    fn checker() -> AccessChecker {
        AccessChecker::new(AccessPolicy {
            admin_roles: vec!["admin".to_string(), "Senior Moderator".to_string()],
            admin_permissions: vec!["administrator".to_string(), "manage_guild".to_string()],
        })
    }

    fn requester(roles: &[&str], permissions: &[&str]) -> Requester {
        Requester::new(
            42,
            "someone",
            roles.iter().map(|s| s.to_string()).collect(),
            permissions.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn role_match_is_case_insensitive() {
        assert!(checker().has_admin_access(&requester(&["ADMIN"], &[])));
        assert!(checker().has_admin_access(&requester(&["senior moderator"], &[])));
    }

    #[test]
    fn permission_match_grants_access() {
        assert!(checker().has_admin_access(&requester(&[], &["manage_guild"])));
    }

    #[test]
    fn either_source_suffices() {
        assert!(checker().has_admin_access(&requester(&["Admin"], &["unrelated"])));
        assert!(checker().has_admin_access(&requester(&["member"], &["administrator"])));
    }

    #[test]
    fn empty_sets_yield_false() {
        assert!(!checker().has_admin_access(&requester(&[], &[])));
    }

    #[test]
    fn unrelated_roles_and_permissions_yield_false() {
        assert!(!checker().has_admin_access(&requester(&["member"], &["send_messages"])));
    }

    #[test]
    fn require_admin_names_the_action() {
        let err = checker()
            .require_admin(&requester(&[], &[]), "delete_macro")
            .unwrap_err();
        assert!(format!("{}", err).contains("delete_macro"));
    }
}
