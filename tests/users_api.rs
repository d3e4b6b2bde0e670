//! HTTP-level tests for `POST /api/users`.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use common::{body_json, build_test_app, post_json, send, test_service};
use serde_json::json;

#[tokio::test]
async fn create_user_returns_201() {
    let service = test_service().await;
    let app = build_test_app(service);

    let response = post_json(
        app,
        "/api/users",
        json!({"username": "alice", "email": "a@example.com"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["username"], "alice");
    assert_eq!(json["email"], "a@example.com");
}

#[tokio::test]
async fn missing_email_returns_400() {
    let service = test_service().await;
    let app = build_test_app(service);

    let response = post_json(app, "/api/users", json!({"username": "alice"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required fields: username and email");
}

#[tokio::test]
async fn non_json_content_type_returns_415() {
    let service = test_service().await;
    let app = build_test_app(service);

    let request = Request::post("/api/users")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from("username=alice"))
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Content-Type must be application/json");
    assert_eq!(json["received_content_type"], "text/plain");
    assert_eq!(json["received_data"], "username=alice");
}

#[tokio::test]
async fn missing_content_type_returns_415() {
    let service = test_service().await;
    let app = build_test_app(service);

    let request = Request::post("/api/users")
        .body(Body::from(r#"{"username":"alice","email":"a@example.com"}"#))
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = body_json(response).await;
    assert!(json["received_content_type"].is_null());
}

#[tokio::test]
async fn duplicate_username_returns_400_without_database_text() {
    let service = test_service().await;

    let first = post_json(
        build_test_app(service.clone()),
        "/api/users",
        json!({"username": "bob", "email": "bob@example.com"}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        build_test_app(service),
        "/api/users",
        json!({"username": "bob", "email": "other@example.com"}),
    )
    .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let json = body_json(second).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("already exists"));
    assert!(!message.contains("UNIQUE"));
}

#[tokio::test]
async fn duplicate_email_returns_400() {
    let service = test_service().await;

    let response = post_json(
        build_test_app(service),
        "/api/users",
        json!({"username": "impostor", "email": "default@example.com"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let service = test_service().await;
    let app = build_test_app(service);

    let request = Request::post("/api/users")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}
