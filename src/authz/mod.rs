//! Authorization module - role hierarchy and permission checks
//!
//! Pure functions over the static role registry and the default permission
//! matrix:
//! - Hierarchy levels, manageable and subordinate roles
//! - Single/any/all permission checks
//! - Field-requirement validation of candidate user records
//! - Navigation and route gating
//!
//! Nothing in here fails on unknown input. Unknown roles rank at level 999,
//! hold no permissions and manage nobody.

pub mod hierarchy;
pub mod navigation;
pub mod permissions;
pub mod validator;

pub use hierarchy::{
    can_manage, get_all_roles_by_hierarchy, get_hierarchy_level, get_manageable_roles,
    get_required_manager_role, get_subordinate_roles,
};
pub use navigation::{can_access_route, filter_navigation_by_role};
pub use permissions::{
    get_enabled_permissions, get_role_permissions, has_all_permissions, has_any_permission,
    has_permission,
};
pub use validator::{can_create_role, validate_role_requirements};
