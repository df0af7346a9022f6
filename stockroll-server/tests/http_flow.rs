//! End-to-end flows through the router
//!
//! Every test gets its own database in a temp directory.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use stockroll_server::{build_router, AppState, Store, REGISTRATION_FAILED};

async fn test_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(&dir.path().join("items.db")).await.unwrap();
    let app = build_router(AppState::new(store), Duration::from_secs(5));
    (dir, app)
}

async fn get_list(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn post_form(app: &Router, form: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn register_coffee_beans() {
    let (_dir, app) = test_app().await;

    let list = get_list(&app).await;
    assert_eq!(list["items"], serde_json::json!([]));
    assert!(list.get("error_message").is_none());

    let response = post_form(&app, "item_name=Coffee+Beans&unit=kg&min_stock=5").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let list = get_list(&app).await;
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_name"], "Coffee Beans");
    assert_eq!(items[0]["unit"], "kg");
    assert_eq!(items[0]["min_stock"], 5);
    assert!(items[0]["id"].is_i64());
}

#[tokio::test]
async fn omitted_min_stock_defaults_to_zero() {
    let (_dir, app) = test_app().await;

    let response = post_form(&app, "item_name=Paper+Cups&unit=box").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = post_form(&app, "item_name=Lids&unit=box&min_stock=").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let list = get_list(&app).await;
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["min_stock"] == 0));
    assert_ne!(items[0]["id"], items[1]["id"]);
}

#[tokio::test]
async fn failed_write_rerenders_current_list() {
    let (_dir, app) = test_app().await;
    post_form(&app, "item_name=Coffee+Beans&unit=kg&min_stock=5").await;

    let response = post_form(&app, "item_name=Tea&unit=g&min_stock=plenty").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let view: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(view["error_message"], REGISTRATION_FAILED);

    let items = view["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_name"], "Coffee Beans");

    let list = get_list(&app).await;
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_required_field_is_rejected() {
    let (_dir, app) = test_app().await;

    let response = post_form(&app, "unit=kg").await;
    assert!(response.status().is_client_error());

    let list = get_list(&app).await;
    assert!(list["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_database() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["database"], true);
}

#[tokio::test]
async fn unreachable_store_is_503() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let store = Store::at_path(&file.path().join("items.db"));
    let app = build_router(AppState::new(store), Duration::from_secs(5));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn slow_request_times_out_without_leaking() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(&dir.path().join("items.db")).await.unwrap();
    let impatient = build_router(AppState::new(store.clone()), Duration::from_millis(200));
    let app = build_router(AppState::new(store.clone()), Duration::from_secs(10));

    // Another writer holds the database, so the insert waits on the lock.
    let mut holder = store.request_scope();
    let conn = holder.acquire().await.unwrap();
    sqlx::query("BEGIN EXCLUSIVE").execute(&mut *conn).await.unwrap();

    let response = post_form(&impatient, "item_name=Stuck&unit=kg&min_stock=1").await;
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

    sqlx::query("ROLLBACK").execute(&mut *conn).await.unwrap();
    holder.release().await;

    let response = post_form(&app, "item_name=Coffee+Beans&unit=kg&min_stock=5").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let list = get_list(&app).await;
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_name"], "Coffee Beans");
}
