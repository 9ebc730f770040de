//! Integration tests for the health endpoint and fallback routing

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::TestContext;

#[actix_web::test]
async fn test_health_reports_dependencies() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["service"], "auth-service");
    assert_eq!(body["data"]["dependencies"]["database"]["status"], "healthy");
    assert_eq!(body["data"]["dependencies"]["revocation_store"]["status"], "healthy");
}

#[actix_web::test]
async fn test_health_is_unavailable_when_store_is_down() {
    let ctx = TestContext::new();
    ctx.store.set_unavailable(true);
    let app = test::init_service(ctx.app()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Unhealthy dependencies: revocation_store",
            "code": 503
        })
    );
}

#[actix_web::test]
async fn test_unknown_route_returns_envelope() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/tasks").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "error": "Not found", "code": 404}));
}
