use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use shareit::api::handlers::AppState;
use shareit::api::router::create_router;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// インメモリストアで動くルーターを作成
fn setup_app() -> axum::Router {
    let service_deps = common::memory_deps();
    create_router(Arc::new(AppState { service_deps }))
}

/// リクエストを送り、ステータスとJSONボディを返す
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    user_id: Option<i64>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header("X-Sharer-User-Id", id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn post_user(app: &axum::Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/users",
        None,
        Some(json!({ "name": name, "email": format!("{name}@example.com") })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn post_item(app: &axum::Router, owner_id: i64, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/items",
        Some(owner_id),
        Some(json!({ "name": name, "description": "for rent", "available": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

// ============================================================================
// E2Eテスト: 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_e2e_health_check() {
    let app = setup_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_e2e_full_booking_flow() {
    let app = setup_app();
    let owner = post_user(&app, "owner").await;
    let booker = post_user(&app, "booker").await;
    let stranger = post_user(&app, "stranger").await;
    let item = post_item(&app, owner, "Drill").await;

    // Step 1: 予約作成（POST /bookings）
    let start = Utc::now() + Duration::days(1);
    let (status, created) = send(
        &app,
        "POST",
        "/bookings",
        Some(booker),
        Some(json!({
            "item_id": item,
            "start": start,
            "end": start + Duration::days(1),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "WAITING");
    let booking_id = created["id"].as_i64().unwrap();

    // Step 2: 所有者が承認（PATCH /bookings/:id?approved=true）
    let (status, approved) = send(
        &app,
        "PATCH",
        &format!("/bookings/{booking_id}?approved=true"),
        Some(owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "APPROVED");
    assert_eq!(approved["item"]["available"], false);

    // Step 3: 第三者は閲覧できない
    let (status, error) = send(
        &app,
        "GET",
        &format!("/bookings/{booking_id}"),
        Some(stranger),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "NOT_BOOKING_PARTICIPANT");

    // Step 4: 借り手の FUTURE 一覧に含まれる
    let (status, list) = send(
        &app,
        "GET",
        "/bookings?state=FUTURE",
        Some(booker),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Step 5: 所有者の一覧（状態省略時は ALL）
    let (status, list) = send(&app, "GET", "/bookings/owner", Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], booking_id);

    // Step 6: 所有者にはアイテムの次回予約が見える
    let (status, detail) = send(&app, "GET", &format!("/items/{item}"), Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["next_booking"]["id"], booking_id);
}

// ============================================================================
// E2Eテスト: エラーケース
// ============================================================================

#[tokio::test]
async fn test_e2e_unknown_state_is_bad_request() {
    let app = setup_app();
    let booker = post_user(&app, "booker").await;

    let (status, error) = send(
        &app,
        "GET",
        "/bookings?state=UNSUPPORTED_STATUS",
        Some(booker),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "UNKNOWN_STATE");
    assert_eq!(error["message"], "Unknown state: UNSUPPORTED_STATUS");
}

#[tokio::test]
async fn test_e2e_missing_user_header_is_bad_request() {
    let app = setup_app();

    let (status, error) = send(&app, "GET", "/bookings", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_e2e_invalid_window_is_bad_request() {
    let app = setup_app();
    let owner = post_user(&app, "owner").await;
    let booker = post_user(&app, "booker").await;
    let item = post_item(&app, owner, "Drill").await;
    let at = Utc::now() + Duration::days(1);

    let (status, error) = send(
        &app,
        "POST",
        "/bookings",
        Some(booker),
        Some(json!({ "item_id": item, "start": at, "end": at })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "INVALID_BOOKING_WINDOW");
}

#[tokio::test]
async fn test_e2e_unknown_booking_is_not_found() {
    let app = setup_app();
    let user = post_user(&app, "someone").await;

    let (status, error) = send(&app, "GET", "/bookings/999", Some(user), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "BOOKING_NOT_FOUND");
}

#[tokio::test]
async fn test_e2e_duplicate_email_is_conflict() {
    let app = setup_app();
    post_user(&app, "alice").await;

    let (status, error) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({ "name": "other", "email": "alice@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_e2e_delete_user_then_get_is_not_found() {
    let app = setup_app();
    let user = post_user(&app, "leaving").await;

    let (status, _) = send(&app, "DELETE", &format!("/users/{user}"), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/users/{user}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_request_with_offered_item() {
    let app = setup_app();
    let asker = post_user(&app, "asker").await;
    let owner = post_user(&app, "owner").await;

    let (status, request) = send(
        &app,
        "POST",
        "/requests",
        Some(asker),
        Some(json!({ "description": "Need a tent" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let request_id = request["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/items",
        Some(owner),
        Some(json!({
            "name": "Tent",
            "description": "Two person",
            "available": true,
            "request_id": request_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, all) = send(&app, "GET", "/requests/all", Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all[0]["items"][0]["name"], "Tent");

    let (status, search) = send(&app, "GET", "/items/search?text=tent", Some(asker), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(search.as_array().unwrap().len(), 1);
}
