//! Policy store core functionality

use super::types::{Policy, PolicyAction, PolicyUpdate, Role, RoleUpdate};
use super::ADMIN_ROLE;
use crate::utils::error::{Result, SecurityError};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory registry of roles and resource/action policies
pub struct PolicyStore {
    /// Role definitions keyed by id
    roles: RwLock<HashMap<String, Role>>,
    /// Policies in registration order; evaluation is first-match
    policies: RwLock<Vec<Policy>>,
}

impl PolicyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            roles: RwLock::new(HashMap::new()),
            policies: RwLock::new(Vec::new()),
        }
    }

    /// Create a store seeded with the default roles and policies
    ///
    /// The seed mirrors the agency's stock setup; deployments may
    /// replace it from configuration.
    pub fn with_defaults() -> Self {
        let store = Self::new();
        store.seed_default_roles();
        store.seed_default_policies();
        store
    }

    fn seed_default_roles(&self) {
        let default_roles = vec![
            Role {
                id: "admin".to_string(),
                name: "Administrator".to_string(),
                permissions: vec!["*".to_string()],
            },
            Role {
                id: "manager".to_string(),
                name: "Branch Manager".to_string(),
                permissions: [
                    "user:read",
                    "user:create",
                    "property:manage",
                    "customer:manage",
                    "report:read",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
            Role {
                id: "agent".to_string(),
                name: "Listing Agent".to_string(),
                permissions: [
                    "property:read",
                    "property:create",
                    "customer:read",
                    "customer:create",
                    "appointment:manage",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
            Role {
                id: "user".to_string(),
                name: "User".to_string(),
                permissions: ["property:read", "customer:read", "profile:manage"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
        ];

        let mut roles = self.roles.write();
        for role in default_roles {
            roles.insert(role.id.clone(), role);
        }
        debug!("Seeded {} default roles", roles.len());
    }

    fn seed_default_policies(&self) {
        let default_policies = vec![
            // Property management
            Policy {
                resource: "property".to_string(),
                action: PolicyAction::Create,
                roles: vec!["admin".into(), "manager".into(), "agent".into()],
            },
            Policy {
                resource: "property".to_string(),
                action: PolicyAction::Read,
                roles: vec![
                    "admin".into(),
                    "manager".into(),
                    "agent".into(),
                    "user".into(),
                ],
            },
            Policy {
                resource: "property".to_string(),
                action: PolicyAction::Update,
                roles: vec!["admin".into(), "manager".into(), "agent".into()],
            },
            Policy {
                resource: "property".to_string(),
                action: PolicyAction::Delete,
                roles: vec!["admin".into(), "manager".into()],
            },
            // Customer management
            Policy {
                resource: "customer".to_string(),
                action: PolicyAction::Manage,
                roles: vec!["admin".into(), "manager".into(), "agent".into()],
            },
            // Reporting
            Policy {
                resource: "report".to_string(),
                action: PolicyAction::Read,
                roles: vec!["admin".into(), "manager".into()],
            },
            // User administration
            Policy {
                resource: "user".to_string(),
                action: PolicyAction::Manage,
                roles: vec!["admin".into()],
            },
            // System administration
            Policy {
                resource: "system".to_string(),
                action: PolicyAction::Manage,
                roles: vec!["admin".into()],
            },
        ];

        let mut policies = self.policies.write();
        policies.extend(default_policies);
        debug!("Seeded {} default policies", policies.len());
    }

    /// Evaluate a permission check for a set of role ids
    ///
    /// The admin role short-circuits to true. Otherwise only the first
    /// policy in registration order matching the resource and the
    /// action (or `manage`) is considered; the check passes iff the
    /// caller holds one of that policy's roles.
    pub fn has_permission(&self, role_ids: &[String], resource: &str, action: PolicyAction) -> bool {
        if role_ids.iter().any(|r| r == ADMIN_ROLE) {
            return true;
        }

        let policies = self.policies.read();
        let Some(policy) = policies.iter().find(|p| {
            p.resource == resource && (p.action == action || p.action == PolicyAction::Manage)
        }) else {
            return false;
        };

        role_ids.iter().any(|r| policy.roles.contains(r))
    }

    /// Register a role
    pub fn add_role(&self, role: Role) -> Result<()> {
        self.validate_role(&role)?;
        self.roles.write().insert(role.id.clone(), role);
        Ok(())
    }

    /// Register a policy at the end of the evaluation order
    pub fn add_policy(&self, policy: Policy) -> Result<()> {
        self.validate_policy(&policy)?;
        self.policies.write().push(policy);
        Ok(())
    }

    /// Get a role by id
    pub fn get_role(&self, role_id: &str) -> Option<Role> {
        self.roles.read().get(role_id).cloned()
    }

    /// All registered roles
    pub fn roles(&self) -> Vec<Role> {
        self.roles.read().values().cloned().collect()
    }

    /// All policies in registration order
    pub fn policies(&self) -> Vec<Policy> {
        self.policies.read().clone()
    }

    /// Policies governing one resource
    pub fn resource_policies(&self, resource: &str) -> Vec<Policy> {
        self.policies
            .read()
            .iter()
            .filter(|p| p.resource == resource)
            .cloned()
            .collect()
    }

    /// Permission strings carried by a role, empty if unknown
    pub fn role_permissions(&self, role_id: &str) -> Vec<String> {
        self.roles
            .read()
            .get(role_id)
            .map(|role| role.permissions.clone())
            .unwrap_or_default()
    }

    /// Apply a partial update to a role
    pub fn update_role(&self, role_id: &str, updates: RoleUpdate) -> Result<()> {
        let mut roles = self.roles.write();
        let role = roles
            .get_mut(role_id)
            .ok_or_else(|| SecurityError::validation(format!("Unknown role: {}", role_id)))?;

        if let Some(name) = updates.name {
            role.name = name;
        }
        if let Some(permissions) = updates.permissions {
            role.permissions = permissions;
        }
        Ok(())
    }

    /// Apply a partial update to the policy at `index`
    pub fn update_policy(&self, index: usize, updates: PolicyUpdate) -> Result<()> {
        if let Some(role_ids) = &updates.roles {
            self.check_roles_exist(role_ids)?;
        }

        let mut policies = self.policies.write();
        let policy = policies
            .get_mut(index)
            .ok_or_else(|| SecurityError::validation(format!("No policy at index {}", index)))?;

        if let Some(resource) = updates.resource {
            policy.resource = resource;
        }
        if let Some(action) = updates.action {
            policy.action = action;
        }
        if let Some(roles) = updates.roles {
            policy.roles = roles;
        }
        Ok(())
    }

    /// Delete a role; the admin role is protected
    pub fn delete_role(&self, role_id: &str) -> Result<()> {
        if role_id == ADMIN_ROLE {
            return Err(SecurityError::protected_role(
                "Cannot delete the admin role",
            ));
        }
        self.roles.write().remove(role_id);
        Ok(())
    }

    /// Delete the policy at `index`
    pub fn delete_policy(&self, index: usize) -> Result<()> {
        let mut policies = self.policies.write();
        if index >= policies.len() {
            return Err(SecurityError::validation(format!(
                "No policy at index {}",
                index
            )));
        }
        policies.remove(index);
        Ok(())
    }

    /// Validate a role definition
    pub fn validate_role(&self, role: &Role) -> Result<()> {
        if role.id.is_empty() {
            return Err(SecurityError::validation("Role id must not be empty"));
        }
        if role.name.is_empty() {
            return Err(SecurityError::validation("Role name must not be empty"));
        }
        Ok(())
    }

    /// Validate a policy definition
    ///
    /// Every role id referenced by a policy must already be registered.
    pub fn validate_policy(&self, policy: &Policy) -> Result<()> {
        if policy.resource.is_empty() {
            return Err(SecurityError::validation(
                "Policy resource must not be empty",
            ));
        }
        self.check_roles_exist(&policy.roles)
    }

    fn check_roles_exist(&self, role_ids: &[String]) -> Result<()> {
        let roles = self.roles.read();
        for role_id in role_ids {
            if !roles.contains_key(role_id) {
                return Err(SecurityError::validation(format!(
                    "Policy references unknown role: {}",
                    role_id
                )));
            }
        }
        Ok(())
    }
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
