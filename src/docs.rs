use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::models;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
	info(title = "crm-rbac", description = "Role hierarchy and permission catalog of the CRM admin console"),
	paths(
		routes::health::health,
		routes::roles::list_roles,
		routes::roles::get_role,
		routes::roles::get_level,
		routes::roles::get_role_permissions,
		routes::roles::get_enabled_permissions,
		routes::roles::get_manageable_roles,
		routes::roles::get_subordinate_roles,
		routes::roles::can_manage,
		routes::roles::can_create,
		routes::permissions::list_permissions,
		routes::permissions::get_matrix,
		routes::permissions::check_permissions,
		routes::users::validate_user,
		routes::navigation::get_navigation,
		routes::navigation::filter_navigation,
		routes::navigation::route_access
	),
	components(
		schemas(
			models::role::Role,
			models::role::RoleRequirements,
			models::role::RoleSummary,
			models::permission::Permission,
			models::user::CandidateUser,
			models::user::ValidationResult,
			models::navigation::NavItem,
			routes::health::HealthResponse,
			routes::roles::RoleLevelResponse,
			routes::roles::RolePermissionsResponse,
			routes::roles::EnabledPermissionsResponse,
			routes::roles::RoleListResponse,
			routes::roles::RolePairRequest,
			routes::roles::DecisionResponse,
			routes::permissions::CheckMode,
			routes::permissions::PermissionCheckRequest,
			routes::permissions::PermissionCheckResponse,
			routes::permissions::PermissionOutcome,
			routes::users::ValidateUserRequest,
			routes::navigation::FilterNavigationRequest,
			routes::navigation::RouteAccessRequest,
			routes::navigation::RouteAccessResponse
		)
	),
	tags(
		(name = "Health", description = "Liveness and catalog version"),
		(name = "Roles", description = "Role hierarchy"),
		(name = "Permissions", description = "Permission matrix and checks"),
		(name = "Users", description = "Candidate user validation"),
		(name = "Navigation", description = "Menu and route gating")
	)
)]
pub struct ApiDoc;

pub fn build_openapi(port: u16) -> anyhow::Result<utoipa::openapi::OpenApi> {
	let mut doc = serde_json::to_value(ApiDoc::openapi())?;

	add_examples(&mut doc);
	ensure_servers(&mut doc, port);

	Ok(serde_json::from_value(doc)?)
}

pub fn swagger_routes(doc: utoipa::openapi::OpenApi) -> anyhow::Result<Router> {
	let swagger_config = utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"])
		.try_it_out_enabled(true);

	let doc_json = Arc::new(serde_json::to_value(&doc)?);

	let json_route = {
		let doc_json = Arc::clone(&doc_json);
		get(move || {
			let doc_json = Arc::clone(&doc_json);
			async move { Json((*doc_json).clone()) }
		})
	};

	Ok(Router::new()
		.route("/api-docs/openapi.json", json_route)
		.merge(SwaggerUi::new("/docs").config(swagger_config)))
}

fn add_examples(doc: &mut Value) {
	if let Some(paths) = doc.get_mut("paths").and_then(Value::as_object_mut) {
		for item in paths.values_mut() {
			if let Some(operations) = item.as_object_mut() {
				for operation in operations.values_mut() {
					apply_parameter_examples(operation);
					apply_request_examples(operation);
				}
			}
		}
	}
}

fn apply_parameter_examples(operation: &mut Value) {
	if let Some(parameters) = operation
		.get_mut("parameters")
		.and_then(Value::as_array_mut)
	{
		for parameter in parameters.iter_mut() {
			if parameter.get("name").and_then(Value::as_str) == Some("role") {
				if let Some(obj) = parameter.as_object_mut() {
					obj.entry("example").or_insert_with(|| json!("TL"));
				}
			}
		}
	}
}

fn apply_request_examples(operation: &mut Value) {
	let Some(request_body) = operation.get_mut("requestBody") else { return; };
	let Some(content) = request_body.get_mut("content").and_then(Value::as_object_mut) else { return; };
	let Some(app_json) = content.get_mut("application/json").and_then(Value::as_object_mut) else { return; };
	let Some(schema) = app_json.get("schema").and_then(Value::as_object) else { return; };
	let Some(reference) = schema.get("$ref").and_then(Value::as_str) else { return; };

	let example = match reference {
		"#/components/schemas/RolePairRequest" => Some(json!({
			"actor": "TL",
			"target": "BA"
		})),
		"#/components/schemas/PermissionCheckRequest" => Some(json!({
			"role": "TL",
			"permissions": ["edit_lead", "approval"],
			"mode": "any"
		})),
		"#/components/schemas/ValidateUserRequest" => Some(json!({
			"role": "SBA",
			"user": {"role": "SBA", "branch_id": 1, "sales_manager_id": 5}
		})),
		"#/components/schemas/FilterNavigationRequest" => Some(json!({
			"role": "BA",
			"items": [
				{"key": "dashboard", "label": "Dashboard", "path": "/dashboard"},
				{"key": "users", "label": "Users", "path": "/users", "required_permissions": ["view_users"]}
			]
		})),
		"#/components/schemas/RouteAccessRequest" => Some(json!({
			"route": "/users/new",
			"role": "BA"
		})),
		_ => None,
	};

	if let Some(example) = example {
		app_json.insert("example".to_string(), example);
	}
}

fn ensure_servers(doc: &mut Value, port: u16) {
	let server_url = format!("http://localhost:{}", port);

	match doc.get_mut("servers") {
		Some(Value::Array(arr)) => {
			let has = arr.iter().any(|v| v.get("url").and_then(Value::as_str) == Some(server_url.as_str()));
			if !has {
				arr.push(json!({ "url": server_url }));
			}
		}
		_ => {
			doc["servers"] = json!([{ "url": server_url }]);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_servers_entry_added_once() {
		let mut doc = json!({"openapi": "3.0.3"});
		ensure_servers(&mut doc, 9000);
		ensure_servers(&mut doc, 9000);
		assert_eq!(doc["servers"], json!([{ "url": "http://localhost:9000" }]));
	}

	#[test]
	fn test_role_parameter_gets_example() {
		let mut operation = json!({"parameters": [{"name": "role", "in": "path"}]});
		apply_parameter_examples(&mut operation);
		assert_eq!(operation["parameters"][0]["example"], json!("TL"));
	}
}
