use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use crm_rbac::config::AppConfig;
use crm_rbac::create_app;

#[tokio::test]
async fn health_endpoint_reports_catalog() -> Result<()> {
    let app = create_app(AppConfig::default())?;

    let req = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())?;

    let resp: Response = app.oneshot(req).await?;
    let status = resp.status();
    assert_eq!(status, StatusCode::OK, "health endpoint did not return 200");

    let body_bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    let v: Value = serde_json::from_slice(&body_bytes)?;
    assert_eq!(v["status"], "ok");
    assert_eq!(v["roles"], 7);
    assert_eq!(v["permissions"], 20);
    assert_eq!(
        v["catalog_fingerprint"].as_str(),
        Some(crm_rbac::catalog::fingerprint())
    );

    Ok(())
}
