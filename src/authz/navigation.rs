//! Menu and route gating by role.

use crate::models::navigation::{NavItem, RoutePermissions};

use super::permissions::has_any_permission;

fn is_visible(item: &NavItem, role: &str) -> bool {
    match item.required_permissions.as_deref() {
        None | Some([]) => true,
        Some(required) => has_any_permission(role, required),
    }
}

/// Keeps items that declare no requirement or whose requirement the role
/// satisfies. Children are filtered the same way under a visible parent.
pub fn filter_navigation_by_role(items: &[NavItem], role: &str) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| is_visible(item, role))
        .map(|item| NavItem {
            children: filter_navigation_by_role(&item.children, role),
            ..item.clone()
        })
        .collect()
}

/// Routes missing from `route_permissions` are open to every role.
pub fn can_access_route(route: &str, role: &str, route_permissions: &RoutePermissions) -> bool {
    match route_permissions.get(route) {
        None => true,
        Some(required) => {
            let allowed = has_any_permission(role, required);
            if !allowed {
                tracing::debug!(route = %route, role = %role, "route access denied");
            }
            allowed
        }
    }
}
