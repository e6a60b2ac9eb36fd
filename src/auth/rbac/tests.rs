//! Policy store tests

#[cfg(test)]
mod tests {
    use crate::auth::rbac::types::{Policy, PolicyAction, PolicyUpdate, Role, RoleUpdate};
    use crate::auth::rbac::PolicyStore;
    use crate::utils::error::SecurityError;

    fn roles(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_are_seeded() {
        let store = PolicyStore::with_defaults();

        assert!(store.get_role("admin").is_some());
        assert!(store.get_role("manager").is_some());
        assert!(store.get_role("agent").is_some());
        assert!(store.get_role("user").is_some());
        assert_eq!(store.policies().len(), 8);
    }

    #[test]
    fn test_admin_bypasses_all_policies() {
        let store = PolicyStore::with_defaults();

        assert!(store.has_permission(&roles(&["admin"]), "system", PolicyAction::Manage));
        assert!(store.has_permission(&roles(&["admin"]), "no-such-resource", PolicyAction::Delete));
        assert!(store.has_permission(&roles(&["admin", "user"]), "report", PolicyAction::Read));
    }

    #[test]
    fn test_policy_grants_by_role_intersection() {
        let store = PolicyStore::with_defaults();

        assert!(store.has_permission(&roles(&["agent"]), "property", PolicyAction::Create));
        assert!(store.has_permission(&roles(&["user"]), "property", PolicyAction::Read));
        assert!(!store.has_permission(&roles(&["user"]), "property", PolicyAction::Delete));
        assert!(!store.has_permission(&roles(&["agent"]), "report", PolicyAction::Read));
    }

    #[test]
    fn test_manage_satisfies_any_action() {
        let store = PolicyStore::with_defaults();

        // Only a manage policy exists for customer
        assert!(store.has_permission(&roles(&["agent"]), "customer", PolicyAction::Create));
        assert!(store.has_permission(&roles(&["agent"]), "customer", PolicyAction::Delete));
        assert!(!store.has_permission(&roles(&["user"]), "customer", PolicyAction::Delete));
    }

    #[test]
    fn test_unknown_resource_is_denied() {
        let store = PolicyStore::with_defaults();

        assert!(!store.has_permission(&roles(&["manager"]), "payroll", PolicyAction::Read));
    }

    #[test]
    fn test_user_denied_system_manage() {
        let store = PolicyStore::with_defaults();

        assert!(!store.has_permission(&roles(&["user"]), "system", PolicyAction::Manage));
    }

    #[test]
    fn test_first_match_wins_over_later_policies() {
        let store = PolicyStore::with_defaults();

        // Second policy for the same resource+action with a disjoint
        // role set; only the first-registered policy decides.
        store
            .add_policy(Policy {
                resource: "report".to_string(),
                action: PolicyAction::Read,
                roles: roles(&["user"]),
            })
            .unwrap();

        assert!(!store.has_permission(&roles(&["user"]), "report", PolicyAction::Read));
        assert!(store.has_permission(&roles(&["manager"]), "report", PolicyAction::Read));
    }

    #[test]
    fn test_add_policy_rejects_unknown_role() {
        let store = PolicyStore::with_defaults();

        let result = store.add_policy(Policy {
            resource: "property".to_string(),
            action: PolicyAction::Read,
            roles: roles(&["ghost"]),
        });

        assert!(matches!(result, Err(SecurityError::Validation(_))));
    }

    #[test]
    fn test_add_and_delete_role() {
        let store = PolicyStore::with_defaults();

        store
            .add_role(Role {
                id: "intern".to_string(),
                name: "Intern".to_string(),
                permissions: vec!["property:read".to_string()],
            })
            .unwrap();
        assert!(store.get_role("intern").is_some());

        store.delete_role("intern").unwrap();
        assert!(store.get_role("intern").is_none());
    }

    #[test]
    fn test_delete_admin_role_is_protected() {
        let store = PolicyStore::with_defaults();

        let result = store.delete_role("admin");
        assert!(matches!(result, Err(SecurityError::ProtectedRole(_))));
        assert!(store.get_role("admin").is_some());
    }

    #[test]
    fn test_update_role() {
        let store = PolicyStore::with_defaults();

        store
            .update_role(
                "agent",
                RoleUpdate {
                    name: Some("Senior Agent".to_string()),
                    permissions: None,
                },
            )
            .unwrap();

        let role = store.get_role("agent").unwrap();
        assert_eq!(role.name, "Senior Agent");
        // Permissions untouched
        assert!(role.permissions.contains(&"property:read".to_string()));
    }

    #[test]
    fn test_update_unknown_role_fails() {
        let store = PolicyStore::with_defaults();

        let result = store.update_role("ghost", RoleUpdate::default());
        assert!(matches!(result, Err(SecurityError::Validation(_))));
    }

    #[test]
    fn test_update_policy_roles_validated() {
        let store = PolicyStore::with_defaults();

        let result = store.update_policy(
            0,
            PolicyUpdate {
                roles: Some(roles(&["ghost"])),
                ..PolicyUpdate::default()
            },
        );
        assert!(matches!(result, Err(SecurityError::Validation(_))));
    }

    #[test]
    fn test_update_policy_changes_action() {
        let store = PolicyStore::with_defaults();

        store
            .update_policy(
                5, // report:read
                PolicyUpdate {
                    action: Some(PolicyAction::Manage),
                    ..PolicyUpdate::default()
                },
            )
            .unwrap();

        assert!(store.has_permission(&roles(&["manager"]), "report", PolicyAction::Delete));
    }

    #[test]
    fn test_delete_policy_out_of_range() {
        let store = PolicyStore::with_defaults();

        let result = store.delete_policy(100);
        assert!(matches!(result, Err(SecurityError::Validation(_))));
    }

    #[test]
    fn test_delete_policy_removes_grant() {
        let store = PolicyStore::with_defaults();

        // report:read is at index 5
        store.delete_policy(5).unwrap();
        assert!(!store.has_permission(&roles(&["manager"]), "report", PolicyAction::Read));
    }

    #[test]
    fn test_resource_policies_filters() {
        let store = PolicyStore::with_defaults();

        let property = store.resource_policies("property");
        assert_eq!(property.len(), 4);
        assert!(property.iter().all(|p| p.resource == "property"));
    }

    #[test]
    fn test_role_permissions_lookup() {
        let store = PolicyStore::with_defaults();

        assert!(store
            .role_permissions("admin")
            .contains(&"*".to_string()));
        assert!(store.role_permissions("ghost").is_empty());
    }
}
