//! Field-requirement validation and role-assignment authorization.

use crate::models::user::{CandidateUser, ValidationResult};

use super::hierarchy::{get_manageable_roles, lookup};

pub const INVALID_ROLE: &str = "Invalid role";
pub const BRANCH_REQUIRED: &str = "Branch is required for this role";
pub const SALES_MANAGER_REQUIRED: &str = "Sales Manager is required for this role";
pub const TEAM_LEADER_REQUIRED: &str = "Team Leader is required for this role";

/// Checks `user` carries every reference `role` declares as required.
///
/// `role` is taken separately from `user.role` so forms can validate a
/// pending role change before the record is updated.
pub fn validate_role_requirements(role: &str, user: &CandidateUser) -> ValidationResult {
    let Some(role) = lookup(role) else {
        return ValidationResult::from_errors(vec![INVALID_ROLE.to_string()]);
    };

    let requirements = role.requirements();
    let mut errors = Vec::new();

    if requirements.branch_required && !user.has_branch() {
        errors.push(BRANCH_REQUIRED.to_string());
    }
    if requirements.manager_required && !user.has_sales_manager() {
        errors.push(SALES_MANAGER_REQUIRED.to_string());
    }
    if requirements.tl_required && !user.has_tl() {
        errors.push(TEAM_LEADER_REQUIRED.to_string());
    }

    if !errors.is_empty() {
        tracing::debug!(%role, errors = ?errors, "role requirements not met");
    }

    ValidationResult::from_errors(errors)
}

/// Declared-relationship check: `target_role` must be one of the creator's
/// manageable roles. Can disagree with `hierarchy::can_manage`.
pub fn can_create_role(creator_role: &str, target_role: &str) -> bool {
    let Some(target) = lookup(target_role) else {
        return false;
    };
    get_manageable_roles(creator_role).contains(&target)
}
