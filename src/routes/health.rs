use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog;
use crate::models::permission::Permission;
use crate::models::role::Role;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub roles: usize,
    pub permissions: usize,
    pub catalog_fingerprint: &'static str,
    pub checked_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Health check", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        roles: Role::ALL.len(),
        permissions: Permission::ALL.len(),
        catalog_fingerprint: catalog::fingerprint(),
        checked_at: Utc::now(),
    })
}
