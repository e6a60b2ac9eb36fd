//! RBAC type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role id, referenced by policies and token claims
    pub id: String,
    /// Display name
    pub name: String,
    /// Permission strings granted by this role; `*` means unrestricted
    pub permissions: Vec<String>,
}

/// Action governed by a policy
///
/// `Manage` is a super-action: a `Manage` policy satisfies any action
/// query for its resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyAction {
    Create,
    Read,
    Update,
    Delete,
    Manage,
}

impl fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Manage => "manage",
        };
        f.write_str(s)
    }
}

/// Rule binding a resource and action to the roles permitted to perform it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Resource name
    pub resource: String,
    /// Governed action
    pub action: PolicyAction,
    /// Role ids permitted
    pub roles: Vec<String>,
}

/// Partial update for a role
#[derive(Debug, Clone, Default)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub permissions: Option<Vec<String>>,
}

/// Partial update for a policy
#[derive(Debug, Clone, Default)]
pub struct PolicyUpdate {
    pub resource: Option<String>,
    pub action: Option<PolicyAction>,
    pub roles: Option<Vec<String>>,
}
