use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, ConfigError};
use crate::errors::AppError;
use crate::models::navigation::{NavItem, RoutePermissions};
use crate::routes::{health, navigation, permissions, roles, users};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn navigation(&self) -> &[NavItem] {
        &self.config.navigation
    }

    pub fn route_permissions(&self) -> &RoutePermissions {
        &self.config.route_permissions
    }
}

pub fn create_app(config: AppConfig) -> Result<Router, AppError> {
    let cors = cors_layer(config.cors_allow_origin.as_deref())?;
    let state = AppState::new(config);

    let role_routes = Router::new()
        .route("/", get(roles::list_roles))
        .route("/can-manage", post(roles::can_manage))
        .route("/can-create", post(roles::can_create))
        .route("/:role", get(roles::get_role))
        .route("/:role/level", get(roles::get_level))
        .route("/:role/permissions", get(roles::get_role_permissions))
        .route("/:role/enabled-permissions", get(roles::get_enabled_permissions))
        .route("/:role/manageable", get(roles::get_manageable_roles))
        .route("/:role/subordinates", get(roles::get_subordinate_roles));

    let permission_routes = Router::new()
        .route("/", get(permissions::list_permissions))
        .route("/matrix", get(permissions::get_matrix))
        .route("/check", post(permissions::check_permissions));

    let user_routes = Router::new().route("/validate", post(users::validate_user));

    let navigation_routes = Router::new()
        .route("/", get(navigation::get_navigation))
        .route("/filter", post(navigation::filter_navigation))
        .route("/route-access", post(navigation::route_access));

    let router = Router::new()
        .route("/api/health", get(health::health))
        .nest("/api/roles", role_routes)
        .nest("/api/permissions", permission_routes)
        .nest("/api/users", user_routes)
        .nest("/api/navigation", navigation_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

fn cors_layer(allow_origin: Option<&str>) -> Result<CorsLayer, AppError> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    match allow_origin {
        None => Ok(cors.allow_origin(Any)),
        Some(origin) => {
            let origin = HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidVar {
                name: "CORS_ALLOW_ORIGIN",
                expected: "a valid origin",
                value: origin.to_string(),
            })?;
            Ok(cors.allow_origin(origin))
        }
    }
}
