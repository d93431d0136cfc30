use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::authz;
use crate::catalog;
use crate::errors::{AppError, AppResult};
use crate::models::permission::{Permission, PermissionMatrix, PermissionRow};
use crate::models::role::Role;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Any listed permission suffices; an empty list is denied.
    #[default]
    Any,
    /// Every listed permission is needed; an empty list is allowed.
    All,
    /// Exactly one permission must be listed.
    Single,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PermissionCheckRequest {
    #[schema(example = "TL")]
    pub role: String,
    #[serde(default)]
    #[schema(example = json!(["edit_lead", "approval"]))]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub mode: CheckMode,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionCheckResponse {
    pub role: String,
    pub mode: CheckMode,
    pub allowed: bool,
    /// Per-permission outcome, in request order.
    pub results: Vec<PermissionOutcome>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionOutcome {
    pub permission: String,
    pub granted: bool,
}

/// Every permission name, in matrix order
#[utoipa::path(
    get,
    path = "/api/permissions",
    tag = "Permissions",
    responses((status = 200, description = "Permission names", body = Vec<Permission>))
)]
pub async fn list_permissions() -> Json<Vec<Permission>> {
    Json(Permission::ALL.to_vec())
}

/// The default role to permission matrix
#[utoipa::path(
    get,
    path = "/api/permissions/matrix",
    tag = "Permissions",
    responses((status = 200, description = "Role name to permission row"))
)]
pub async fn get_matrix() -> impl IntoResponse {
    let matrix: BTreeMap<Role, PermissionRow> = PermissionMatrix::defaults()
        .rows()
        .map(|(role, row)| (role, row.clone()))
        .collect();

    ([(header::ETAG, catalog::etag())], Json(matrix))
}

/// Check one or more permissions for a role
#[utoipa::path(
    post,
    path = "/api/permissions/check",
    tag = "Permissions",
    request_body = PermissionCheckRequest,
    responses(
        (status = 200, description = "Check outcome", body = PermissionCheckResponse),
        (status = 400, description = "Malformed body, or single mode without exactly one permission"),
    )
)]
pub async fn check_permissions(
    payload: Result<Json<PermissionCheckRequest>, JsonRejection>,
) -> AppResult<Json<PermissionCheckResponse>> {
    let Json(req) = payload?;

    let allowed = match req.mode {
        CheckMode::Any => authz::has_any_permission(&req.role, &req.permissions),
        CheckMode::All => authz::has_all_permissions(&req.role, &req.permissions),
        CheckMode::Single => match req.permissions.as_slice() {
            [permission] => authz::has_permission(&req.role, permission),
            _ => {
                return Err(AppError::bad_request(
                    "single mode needs exactly one permission",
                ))
            }
        },
    };

    let results = req
        .permissions
        .iter()
        .map(|p| PermissionOutcome {
            permission: p.clone(),
            granted: authz::has_permission(&req.role, p),
        })
        .collect();

    Ok(Json(PermissionCheckResponse {
        role: req.role,
        mode: req.mode,
        allowed,
        results,
    }))
}
