use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use crm_rbac::config::AppConfig;
use crm_rbac::create_app;

async fn check(app: &Router, body: Value) -> Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method("POST")
        .uri("/api/permissions/check")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn list_permissions_in_matrix_order() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let req = Request::builder().uri("/api/permissions").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    let names: Vec<String> = serde_json::from_slice(&bytes)?;
    assert_eq!(names.len(), 20);
    assert_eq!(names.first().map(String::as_str), Some("view_dashboard"));
    assert_eq!(names.last().map(String::as_str), Some("attendance"));

    Ok(())
}

#[tokio::test]
async fn matrix_has_full_rows_and_etag() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let req = Request::builder().uri("/api/permissions/matrix").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::ETAG));

    let bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    let matrix: Value = serde_json::from_slice(&bytes)?;
    let rows = matrix.as_object().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 7);
    for (role, row) in rows {
        assert_eq!(row.as_object().map(|r| r.len()), Some(20), "{role} row incomplete");
    }
    assert_eq!(matrix["HR"]["attendance"], true);
    assert_eq!(matrix["HR"]["assign_lead"], false);

    Ok(())
}

#[tokio::test]
async fn any_and_all_modes_on_empty_lists() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let (status, any) = check(&app, json!({"role": "SUPERADMIN", "permissions": []})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(any["mode"], "any");
    assert_eq!(any["allowed"], false);

    let (_, all) = check(&app, json!({"role": "BA", "permissions": [], "mode": "all"})).await?;
    assert_eq!(all["allowed"], true);

    Ok(())
}

#[tokio::test]
async fn check_reports_each_permission() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let (_, res) = check(
        &app,
        json!({"role": "TL", "permissions": ["assign_lead", "approval"], "mode": "all"}),
    )
    .await?;
    assert_eq!(res["allowed"], false);
    assert_eq!(
        res["results"],
        json!([
            {"permission": "assign_lead", "granted": true},
            {"permission": "approval", "granted": false}
        ])
    );

    let (_, res) = check(
        &app,
        json!({"role": "TL", "permissions": ["assign_lead", "approval"], "mode": "any"}),
    )
    .await?;
    assert_eq!(res["allowed"], true);

    Ok(())
}

#[tokio::test]
async fn single_mode_needs_one_permission() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let (status, res) = check(&app, json!({"role": "HR", "permissions": ["edit_kyc"], "mode": "single"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["allowed"], true);

    let (status, _) = check(&app, json!({"role": "HR", "permissions": [], "mode": "single"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, res) = check(&app, json!({"role": "GHOST", "permissions": ["view_leads"], "mode": "single"})).await?;
    assert_eq!(res["allowed"], false);

    Ok(())
}
