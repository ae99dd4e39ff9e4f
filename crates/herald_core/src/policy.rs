//! Access policy and requester value types.
//!
//! Authorization is a pure function over these explicit value types rather
//! than any live bot/web framework object; adapters build a [`Requester`]
//! from whatever user model their platform exposes.

use serde::{Deserialize, Serialize};

/// Process-wide administrative policy.
///
/// A user satisfies the policy when their role names intersect
/// `admin_roles` (case-insensitively) or their platform permission names
/// intersect `admin_permissions`. The policy is configured once per process
/// in the settings file; it is not per-guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    /// Role names granting admin access, compared case-insensitively
    #[serde(default = "default_admin_roles")]
    pub admin_roles: Vec<String>,
    /// Platform permission names granting admin access
    #[serde(default = "default_admin_permissions")]
    pub admin_permissions: Vec<String>,
}

fn default_admin_roles() -> Vec<String> {
    vec!["admin".to_string()]
}

fn default_admin_permissions() -> Vec<String> {
    vec!["administrator".to_string()]
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            admin_roles: default_admin_roles(),
            admin_permissions: default_admin_permissions(),
        }
    }
}

/// The acting user behind a request, as explicit values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Requester {
    /// Numeric user id
    pub id: u64,
    /// Display name, recorded as macro author
    pub name: String,
    /// Role names the user holds in the guild
    pub roles: Vec<String>,
    /// Platform permission names the user holds in the guild, lowercased
    pub permissions: Vec<String>,
}

impl Requester {
    /// Build a requester from its parts.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        roles: Vec<String>,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            roles,
            permissions,
        }
    }
}
