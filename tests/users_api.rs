use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use crm_rbac::config::AppConfig;
use crm_rbac::create_app;

async fn validate(app: &Router, body: Value) -> Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method("POST")
        .uri("/api/users/validate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn sba_without_team_leader_is_invalid() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let (status, res) = validate(
        &app,
        json!({"user": {"role": "SBA", "branch_id": 1, "sales_manager_id": 5}}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "invalid records are not HTTP errors");
    assert_eq!(res["valid"], false);
    assert_eq!(res["errors"], json!(["Team Leader is required for this role"]));

    Ok(())
}

#[tokio::test]
async fn explicit_role_overrides_record_role() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    // promoting a BA to TL: the TL requirements apply, tl_id no longer matters
    let (_, res) = validate(
        &app,
        json!({"role": "TL", "user": {"role": "BA", "branch_id": "b-2", "sales_manager_id": 9}}),
    )
    .await?;
    assert_eq!(res, json!({"valid": true, "errors": []}));

    Ok(())
}

#[tokio::test]
async fn superadmin_and_unknown_roles() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let (_, res) = validate(&app, json!({"user": {"role": "SUPERADMIN"}})).await?;
    assert_eq!(res, json!({"valid": true, "errors": []}));

    let (_, res) = validate(&app, json!({"user": {"role": "CEO", "branch_id": 1}})).await?;
    assert_eq!(res, json!({"valid": false, "errors": ["Invalid role"]}));

    Ok(())
}

#[tokio::test]
async fn null_and_zero_references_count_as_missing() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let (_, res) = validate(
        &app,
        json!({"user": {"role": "BA", "branch_id": null, "sales_manager_id": 0, "tl_id": ""}}),
    )
    .await?;
    assert_eq!(
        res["errors"],
        json!([
            "Branch is required for this role",
            "Sales Manager is required for this role",
            "Team Leader is required for this role"
        ])
    );

    Ok(())
}

#[tokio::test]
async fn missing_user_is_bad_request() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let (status, res) = validate(&app, json!({"role": "TL"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "bad_request");

    Ok(())
}
