//! Authority ordering over the role registry.
//!
//! Every function here accepts the raw role string the backend sends and
//! degrades to a safe default for anything it does not recognise.

use crate::models::role::{Role, UNKNOWN_ROLE_LEVEL};

pub(crate) fn lookup(role: &str) -> Option<Role> {
    let parsed = Role::parse(role);
    if parsed.is_none() {
        tracing::debug!(role = %role, "unknown role, using default");
    }
    parsed
}

/// Configured level for `role`, or [`UNKNOWN_ROLE_LEVEL`] when unknown.
pub fn get_hierarchy_level(role: &str) -> u32 {
    lookup(role)
        .map(|r| r.hierarchy_level())
        .unwrap_or(UNKNOWN_ROLE_LEVEL)
}

/// Pure level comparison: `manager` must sit strictly above `user`.
///
/// This does not consult the declared manageable roles. Use
/// [`get_manageable_roles`] or `validator::can_create_role` for that.
pub fn can_manage(manager_role: &str, user_role: &str) -> bool {
    get_hierarchy_level(manager_role) < get_hierarchy_level(user_role)
}

pub fn get_manageable_roles(role: &str) -> Vec<Role> {
    lookup(role)
        .map(|r| r.can_manage_roles().to_vec())
        .unwrap_or_default()
}

pub fn get_required_manager_role(role: &str) -> Option<Role> {
    lookup(role).and_then(|r| r.reports_to())
}

/// All roles, most authority first. Ties keep registry order.
pub fn get_all_roles_by_hierarchy() -> Vec<Role> {
    let mut roles = Role::ALL.to_vec();
    // sort_by_key is stable
    roles.sort_by_key(|r| r.hierarchy_level());
    roles
}

/// Every role with a strictly greater level than `role`.
///
/// Broader than [`get_manageable_roles`]: a role can outrank another
/// without being declared able to administer it.
pub fn get_subordinate_roles(role: &str) -> Vec<Role> {
    let level = get_hierarchy_level(role);
    get_all_roles_by_hierarchy()
        .into_iter()
        .filter(|r| r.hierarchy_level() > level)
        .collect()
}
