//! Capability checks over the default permission matrix.

use crate::models::permission::{Permission, PermissionMatrix, PermissionRow};

use super::hierarchy::lookup;

/// `false` when either the role or the permission is unknown.
pub fn has_permission(role: &str, permission: &str) -> bool {
    let Some(role) = lookup(role) else {
        return false;
    };
    let Some(permission) = Permission::parse(permission) else {
        tracing::debug!(%role, permission = %permission, "unknown permission, denying");
        return false;
    };

    let granted = PermissionMatrix::defaults().is_granted(role, permission);
    if !granted {
        tracing::debug!(%role, %permission, "permission denied");
    }
    granted
}

/// The role's full row, or an empty row when the role is unknown.
pub fn get_role_permissions(role: &str) -> PermissionRow {
    lookup(role)
        .and_then(|r| PermissionMatrix::defaults().row(r).cloned())
        .unwrap_or_default()
}

/// True when at least one listed permission is granted. An empty list is `false`.
pub fn has_any_permission<S: AsRef<str>>(role: &str, permissions: &[S]) -> bool {
    permissions.iter().any(|p| has_permission(role, p.as_ref()))
}

/// True when every listed permission is granted. An empty list is `true`.
pub fn has_all_permissions<S: AsRef<str>>(role: &str, permissions: &[S]) -> bool {
    permissions.iter().all(|p| has_permission(role, p.as_ref()))
}

/// Granted permission names, in matrix order.
pub fn get_enabled_permissions(role: &str) -> Vec<Permission> {
    get_role_permissions(role)
        .into_iter()
        .filter_map(|(p, granted)| granted.then_some(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::Role;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_single_permission() {
        assert!(has_permission("SUPERADMIN", "manage_permissions"));
        assert!(has_permission("TL", "assign_lead"));
        assert!(!has_permission("BA", "add_user"));
        assert!(!has_permission("GHOST", "view_leads"));
        assert!(!has_permission("TL", "launch_rockets"));
    }

    #[test]
    fn test_has_permission_agrees_with_row() {
        for role in Role::ALL {
            let row = get_role_permissions(role.as_str());
            for p in Permission::ALL {
                assert_eq!(
                    has_permission(role.as_str(), p.as_str()),
                    row.get(&p).copied().unwrap_or(false)
                );
            }
        }
    }

    #[test]
    fn test_unknown_role_has_empty_row() {
        assert!(get_role_permissions("GHOST").is_empty());
        assert!(get_enabled_permissions("GHOST").is_empty());
    }

    #[test]
    fn test_empty_lists_any_false_all_true() {
        for role in ["SUPERADMIN", "BA", "GHOST"] {
            assert!(!has_any_permission(role, &NONE));
            assert!(has_all_permissions(role, &NONE));
        }
    }

    #[test]
    fn test_any_and_all() {
        assert!(has_any_permission("BA", &["add_user", "view_leads"]));
        assert!(!has_all_permissions("BA", &["add_user", "view_leads"]));
        assert!(has_all_permissions("HR", &["attendance", "edit_kyc"]));
        assert!(!has_any_permission("HR", &["assign_lead", "approval"]));
    }

    #[test]
    fn test_enabled_permissions_in_matrix_order() {
        assert_eq!(
            get_enabled_permissions("BA"),
            vec![
                Permission::ViewDashboard,
                Permission::ViewLeads,
                Permission::AddLead,
                Permission::EditLead
            ]
        );
        assert_eq!(get_enabled_permissions("SUPERADMIN"), Permission::ALL.to_vec());
    }
}
