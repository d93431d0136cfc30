//! Role catalog routes
//!
//! Read-only views over the role registry. Derived lookups keep the library's
//! unknown-role defaults (empty lists, level 999); only the definition
//! endpoint answers 404.

use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::authz;
use crate::catalog;
use crate::errors::{AppError, AppResult};
use crate::models::permission::{Permission, PermissionRow};
use crate::models::role::{Role, RoleSummary};

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleLevelResponse {
    #[schema(example = "TL")]
    pub role: String,
    pub known: bool,
    #[schema(example = 4)]
    pub hierarchy_level: u32,
    pub reports_to: Option<Role>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RolePermissionsResponse {
    pub role: String,
    #[schema(value_type = Object)]
    pub permissions: PermissionRow,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnabledPermissionsResponse {
    pub role: String,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleListResponse {
    pub role: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RolePairRequest {
    /// Acting role (the manager or creator).
    #[schema(example = "TL")]
    pub actor: String,
    #[schema(example = "BA")]
    pub target: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DecisionResponse {
    pub allowed: bool,
}

/// All roles, most authority first
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Roles",
    responses((status = 200, description = "Roles in hierarchy order", body = Vec<RoleSummary>))
)]
pub async fn list_roles() -> impl IntoResponse {
    let roles: Vec<RoleSummary> = authz::get_all_roles_by_hierarchy()
        .iter()
        .map(|r| RoleSummary::from(r.definition()))
        .collect();

    ([(header::ETAG, catalog::etag())], Json(roles))
}

/// Definition of a single role
#[utoipa::path(
    get,
    path = "/api/roles/{role}",
    tag = "Roles",
    params(("role" = String, Path, description = "Role identifier, e.g. TL")),
    responses(
        (status = 200, description = "Role definition", body = RoleSummary),
        (status = 404, description = "Unknown role"),
    )
)]
pub async fn get_role(Path(role): Path<String>) -> AppResult<Json<RoleSummary>> {
    let role = Role::parse(&role).ok_or_else(|| AppError::not_found(format!("role {role}")))?;
    Ok(Json(RoleSummary::from(role.definition())))
}

/// Hierarchy level and reporting line
#[utoipa::path(
    get,
    path = "/api/roles/{role}/level",
    tag = "Roles",
    params(("role" = String, Path, description = "Role identifier")),
    responses((status = 200, description = "Level, 999 when unknown", body = RoleLevelResponse))
)]
pub async fn get_level(Path(role): Path<String>) -> Json<RoleLevelResponse> {
    Json(RoleLevelResponse {
        known: Role::parse(&role).is_some(),
        hierarchy_level: authz::get_hierarchy_level(&role),
        reports_to: authz::get_required_manager_role(&role),
        role,
    })
}

/// Full permission row of a role
#[utoipa::path(
    get,
    path = "/api/roles/{role}/permissions",
    tag = "Roles",
    params(("role" = String, Path, description = "Role identifier")),
    responses((status = 200, description = "Permission name to flag; empty when unknown", body = RolePermissionsResponse))
)]
pub async fn get_role_permissions(Path(role): Path<String>) -> Json<RolePermissionsResponse> {
    Json(RolePermissionsResponse {
        permissions: authz::get_role_permissions(&role),
        role,
    })
}

/// Granted permissions of a role, in matrix order
#[utoipa::path(
    get,
    path = "/api/roles/{role}/enabled-permissions",
    tag = "Roles",
    params(("role" = String, Path, description = "Role identifier")),
    responses((status = 200, description = "Granted permissions", body = EnabledPermissionsResponse))
)]
pub async fn get_enabled_permissions(Path(role): Path<String>) -> Json<EnabledPermissionsResponse> {
    Json(EnabledPermissionsResponse {
        permissions: authz::get_enabled_permissions(&role),
        role,
    })
}

/// Roles this role is declared able to administer
#[utoipa::path(
    get,
    path = "/api/roles/{role}/manageable",
    tag = "Roles",
    params(("role" = String, Path, description = "Role identifier")),
    responses((status = 200, description = "Manageable roles", body = RoleListResponse))
)]
pub async fn get_manageable_roles(Path(role): Path<String>) -> Json<RoleListResponse> {
    Json(RoleListResponse {
        roles: authz::get_manageable_roles(&role),
        role,
    })
}

/// Every role ranked strictly below this one
#[utoipa::path(
    get,
    path = "/api/roles/{role}/subordinates",
    tag = "Roles",
    params(("role" = String, Path, description = "Role identifier")),
    responses((status = 200, description = "Subordinate roles", body = RoleListResponse))
)]
pub async fn get_subordinate_roles(Path(role): Path<String>) -> Json<RoleListResponse> {
    Json(RoleListResponse {
        roles: authz::get_subordinate_roles(&role),
        role,
    })
}

/// Level comparison between two roles
#[utoipa::path(
    post,
    path = "/api/roles/can-manage",
    tag = "Roles",
    request_body = RolePairRequest,
    responses(
        (status = 200, description = "True when actor ranks strictly above target", body = DecisionResponse),
        (status = 400, description = "Malformed body"),
    )
)]
pub async fn can_manage(
    payload: Result<Json<RolePairRequest>, JsonRejection>,
) -> AppResult<Json<DecisionResponse>> {
    let Json(req) = payload?;
    Ok(Json(DecisionResponse {
        allowed: authz::can_manage(&req.actor, &req.target),
    }))
}

/// Whether the actor may create a user with the target role
#[utoipa::path(
    post,
    path = "/api/roles/can-create",
    tag = "Roles",
    request_body = RolePairRequest,
    responses(
        (status = 200, description = "True when target is among the actor's manageable roles", body = DecisionResponse),
        (status = 400, description = "Malformed body"),
    )
)]
pub async fn can_create(
    payload: Result<Json<RolePairRequest>, JsonRejection>,
) -> AppResult<Json<DecisionResponse>> {
    let Json(req) = payload?;
    Ok(Json(DecisionResponse {
        allowed: authz::can_create_role(&req.actor, &req.target),
    }))
}
