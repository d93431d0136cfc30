use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::authz;
use crate::errors::AppResult;
use crate::models::user::{CandidateUser, ValidationResult};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateUserRequest {
    /// Role to validate against; defaults to `user.role`.
    #[serde(default)]
    #[schema(example = "SBA")]
    pub role: Option<String>,
    pub user: CandidateUser,
}

/// Validate a user record against its role's required fields
#[utoipa::path(
    post,
    path = "/api/users/validate",
    tag = "Users",
    request_body = ValidateUserRequest,
    responses(
        (status = 200, description = "Validation outcome; invalid records are not an HTTP error", body = ValidationResult),
        (status = 400, description = "Malformed body"),
    )
)]
pub async fn validate_user(
    payload: Result<Json<ValidateUserRequest>, JsonRejection>,
) -> AppResult<Json<ValidationResult>> {
    let Json(req) = payload?;
    let role = req.role.as_deref().unwrap_or(&req.user.role);
    Ok(Json(authz::validate_role_requirements(role, &req.user)))
}
