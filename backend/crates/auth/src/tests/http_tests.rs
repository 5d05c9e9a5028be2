//! HTTP route tests
//!
//! Drive the router with `oneshot` and inspect status, `code` and body.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::memory::MemoryStore;
use crate::application::AuthConfig;
use crate::presentation::router::auth_router_generic;

const PASSWORD: &str = "Passw0rd!";

fn app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let router = auth_router_generic(store.clone(), AuthConfig::development());
    (router, store)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn register(app: &Router, email: &str, name: &str, role: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/register",
        None,
        Some(json!({
            "email": email,
            "password": PASSWORD,
            "name": name,
            "role": role,
        })),
    )
    .await
}

async fn login(app: &Router, email: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn str_field<'a>(body: &'a Value, key: &str) -> &'a str {
    body[key].as_str().unwrap()
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let (app, _store) = app();

    let (status, body) = register(&app, "alice@example.com", "Alice", "viewer").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["role"], "viewer");
    assert!(body["data"]["id"].is_string());
    assert!(body["message"].is_string());

    let tokens = login(&app, "alice@example.com").await;
    assert_eq!(tokens["user"]["name"], "Alice");
    let access = str_field(&tokens, "access_token").to_string();
    let refresh = str_field(&tokens, "refresh_token").to_string();

    let (status, body) = send(&app, Method::GET, "/verify", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["role"], "viewer");
    assert_eq!(body["user_id"], tokens["user"]["id"]);

    let (status, rotated) = send(
        &app,
        Method::POST,
        "/refresh",
        None,
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(str_field(&rotated, "refresh_token"), refresh);

    let (status, body) = send(
        &app,
        Method::POST,
        "/refresh",
        None,
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "TOKEN_REVOKED");

    let (status, body) = send(&app, Method::GET, "/sessions", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    let sessions = body.as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().any(|s| s["status"] == "active"));
    assert!(sessions.iter().any(|s| s["status"] == "revoked"));

    let (status, body) = send(&app, Method::POST, "/logout", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    assert!(body.get("data").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/refresh",
        None,
        Some(json!({ "refresh_token": str_field(&rotated, "refresh_token") })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "TOKEN_REVOKED");
}

#[tokio::test]
async fn test_bearer_header_is_strict() {
    let (app, _store) = app();
    register(&app, "alice@example.com", "Alice", "analyst").await;
    let tokens = login(&app, "alice@example.com").await;
    let access = str_field(&tokens, "access_token");

    let (status, body) = send(&app, Method::GET, "/verify", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    for value in [
        format!("bearer {access}"),
        format!("Token {access}"),
        format!("Bearer  {access}"),
        format!("Bearer {access} extra"),
        "Bearer".to_string(),
        "Bearer ".to_string(),
    ] {
        let request = Request::builder()
            .uri("/verify")
            .header(header::AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send_raw(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    let (status, body) = send(&app, Method::GET, "/verify", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_error_status_and_code_mapping() {
    let (app, _store) = app();
    register(&app, "alice@example.com", "Alice", "analyst").await;

    let (status, body) = register(&app, "not-an-email", "Alice", "analyst").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_EMAIL");
    assert_eq!(body["status"], 400);

    let (status, body) = register(&app, "ALICE@example.com", "Alice", "analyst").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "USER_ALREADY_EXISTS");

    let (status, body) = register(&app, "bob@example.com", "Bob", "superuser").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ROLE");

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "Wrong1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");

    let (status, body) = send(
        &app,
        Method::POST,
        "/refresh",
        None,
        Some(json!({ "refresh_token": "unknown" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, _store) = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send_raw(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");

    let (status, body) = send(
        &app,
        Method::POST,
        "/refresh",
        None,
        Some(json!({ "token": "missing field" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_error_body_is_problem_json() {
    let (app, _store) = app();

    let request = Request::builder()
        .uri("/verify")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
}

#[tokio::test]
async fn test_user_status_route() {
    let (app, store) = app();
    register(&app, "root@example.com", "Root", "admin").await;
    register(&app, "alice@example.com", "Alice", "viewer").await;
    let admin = login(&app, "root@example.com").await;
    let alice = login(&app, "alice@example.com").await;
    let admin_token = str_field(&admin, "access_token");
    let alice_token = str_field(&alice, "access_token");
    let alice_id = store.user_by_email("alice@example.com").unwrap().user_id;
    let root_id = store.user_by_email("root@example.com").unwrap().user_id;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/users/{root_id}/status"),
        Some(alice_token),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "INSUFFICIENT_ROLE");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/users/not-a-uuid/status",
        Some(admin_token),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/users/{alice_id}/status"),
        Some(admin_token),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], alice_id.to_string());
    assert_eq!(body["is_active"], false);
    assert_eq!(body["revoked_sessions"], 1);

    let (status, body) = send(&app, Method::GET, "/verify", Some(alice_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "USER_INACTIVE");
}
