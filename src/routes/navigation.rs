use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::app::AppState;
use crate::authz;
use crate::errors::AppResult;
use crate::models::navigation::{NavItem, RoutePermissions};

#[derive(Debug, Deserialize, IntoParams)]
pub struct NavigationQuery {
    /// Role identifier, e.g. TL
    pub role: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FilterNavigationRequest {
    #[schema(example = "BA")]
    pub role: String,
    pub items: Vec<NavItem>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RouteAccessRequest {
    #[schema(example = "/users/new")]
    pub route: String,
    #[schema(example = "BA")]
    pub role: String,
    /// Overrides the configured route map for this check.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub route_permissions: Option<RoutePermissions>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RouteAccessResponse {
    pub route: String,
    pub allowed: bool,
    /// Whether the route map lists the route at all; unlisted routes are open.
    pub guarded: bool,
}

/// Configured menu filtered for a role
#[utoipa::path(
    get,
    path = "/api/navigation",
    tag = "Navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Visible menu entries", body = Vec<NavItem>),
        (status = 400, description = "Missing role"),
    )
)]
pub async fn get_navigation(
    State(state): State<AppState>,
    query: Result<Query<NavigationQuery>, QueryRejection>,
) -> AppResult<Json<Vec<NavItem>>> {
    let Query(query) = query?;
    Ok(Json(authz::filter_navigation_by_role(state.navigation(), &query.role)))
}

/// Filter caller-supplied menu entries for a role
#[utoipa::path(
    post,
    path = "/api/navigation/filter",
    tag = "Navigation",
    request_body = FilterNavigationRequest,
    responses(
        (status = 200, description = "Visible menu entries", body = Vec<NavItem>),
        (status = 400, description = "Malformed body"),
    )
)]
pub async fn filter_navigation(
    payload: Result<Json<FilterNavigationRequest>, JsonRejection>,
) -> AppResult<Json<Vec<NavItem>>> {
    let Json(req) = payload?;
    Ok(Json(authz::filter_navigation_by_role(&req.items, &req.role)))
}

/// Route guard decision
#[utoipa::path(
    post,
    path = "/api/navigation/route-access",
    tag = "Navigation",
    request_body = RouteAccessRequest,
    responses(
        (status = 200, description = "Guard outcome", body = RouteAccessResponse),
        (status = 400, description = "Malformed body"),
    )
)]
pub async fn route_access(
    State(state): State<AppState>,
    payload: Result<Json<RouteAccessRequest>, JsonRejection>,
) -> AppResult<Json<RouteAccessResponse>> {
    let Json(req) = payload?;
    let routes = req.route_permissions.as_ref().unwrap_or(state.route_permissions());

    Ok(Json(RouteAccessResponse {
        allowed: authz::can_access_route(&req.route, &req.role, routes),
        guarded: routes.contains_key(&req.route),
        route: req.route,
    }))
}
