mod common;

use axum::http::{Method, StatusCode};
use campusdesk::domain::Role;
use campusdesk::models::user::UserFilter;
use campusdesk::services::TokenKind;
use chrono::{Duration, Utc};
use common::{PASSWORD, spawn_app, spawn_app_with};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let (status, body) = app.request(Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "ok");
}

#[tokio::test]
async fn test_register_returns_student_with_tokens() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({"name": "Ada Lovelace", "email": "Ada@Campus.edu", "password": PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], "ada@campus.edu");
    assert_eq!(body["data"]["user"]["roles"], json!(["student"]));
    assert!(body["data"]["user"].get("passwordHash").is_none());
    assert!(body["data"]["accessToken"].is_string());
    assert!(body["data"]["refreshToken"].is_string());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict_and_creates_nothing() {
    let app = spawn_app().await;
    app.register("First", "dup@campus.edu").await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({"name": "Second", "email": "DUP@campus.edu", "password": PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let users = app
        .state
        .store()
        .users()
        .list(&UserFilter {
            role: None,
            include_inactive: true,
        })
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_register_validation_names_field() {
    let app = spawn_app().await;

    let cases = [
        (json!({"name": "A", "email": "not-an-email", "password": PASSWORD}), "email"),
        (json!({"name": "A", "email": "a@campus.edu", "password": "12345"}), "password"),
        (json!({"name": "   ", "email": "a@campus.edu", "password": PASSWORD}), "name"),
        (json!({"name": "x".repeat(101), "email": "a@campus.edu", "password": PASSWORD}), "name"),
        (json!({"email": "a@campus.edu", "password": PASSWORD}), "name"),
    ];

    for (payload, field) in cases {
        let (status, body) = app.post("/api/auth/register", None, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body["field"], field, "{body}");
    }
}

#[tokio::test]
async fn test_six_character_password_is_enough() {
    let app = spawn_app().await;

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({"name": "Short", "email": "short@campus.edu", "password": "abcdef"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_then_protected_route() {
    let app = spawn_app().await;
    app.register("Grace", "grace@campus.edu").await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "grace@campus.edu", "password": PASSWORD}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["accessToken"].as_str().unwrap().to_string();

    let (status, body) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "grace@campus.edu");
    assert_eq!(body["data"]["name"], "Grace");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;
    app.register("Grace", "grace@campus.edu").await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "grace@campus.edu", "password": "wrong-password"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "nobody@campus.edu", "password": PASSWORD}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_malformed_and_expired_tokens() {
    let app = spawn_app().await;
    let student = app.register("Alan", "alan@campus.edu").await;

    let (status, _) = app.request(Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/auth/me", "definitely.not.valid").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = app.state.auth().me(student.id).await.unwrap();
    let expired = app
        .state
        .tokens()
        .issue_at(&user, TokenKind::Access, Utc::now() - Duration::hours(2))
        .unwrap();

    let (status, body) = app.get("/api/auth/me", &expired).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token has expired");

    let (status, _) = app.get("/api/auth/me", &student.token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_flow_and_token_kinds() {
    let app = spawn_app().await;

    let (_, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({"name": "Linus", "email": "linus@campus.edu", "password": PASSWORD}),
        )
        .await;
    let access = body["data"]["accessToken"].as_str().unwrap().to_string();
    let refresh = body["data"]["refreshToken"].as_str().unwrap().to_string();

    let (status, _) = app.get("/api/auth/me", &refresh).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post("/api/auth/refresh", None, json!({"refreshToken": access}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post("/api/auth/refresh", None, json!({"refreshToken": refresh}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let fresh = body["data"]["accessToken"].as_str().unwrap();

    let (status, _) = app.get("/api/auth/me", fresh).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_change_password() {
    let app = spawn_app().await;
    let student = app.register("Barbara", "barbara@campus.edu").await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/auth/password",
            Some(&student.token),
            Some(json!({"currentPassword": "nope-nope", "newPassword": "brand-new-pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "currentPassword");

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/auth/password",
            Some(&student.token),
            Some(json!({"currentPassword": PASSWORD, "newPassword": "brand-new-pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "barbara@campus.edu", "password": PASSWORD}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "barbara@campus.edu", "password": "brand-new-pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_deleted_and_inactive_users_are_locked_out() {
    let app = spawn_app().await;
    let admin = app.admin().await;
    let gone = app.register("Gone", "gone@campus.edu").await;
    let paused = app.register("Paused", "paused@campus.edu").await;

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/users/{}", gone.id),
            Some(&admin.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "gone@campus.edu", "password": PASSWORD}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/users/{}/active", paused.id),
            Some(&admin.token),
            Some(json!({"active": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "paused@campus.edu", "password": PASSWORD}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Tokens issued before deactivation stop working too.
    let (status, _) = app.get("/api/auth/me", &paused.token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_auth_routes_are_rate_limited() {
    let app = spawn_app_with(|config| {
        config.rate_limit.max_requests = 2;
        config.rate_limit.window_seconds = 600;
    })
    .await;

    let payload = json!({"email": "x@campus.edu", "password": PASSWORD});
    for _ in 0..2 {
        let (status, _) = app.post("/api/auth/login", None, payload.clone()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (status, body) = app.post("/api/auth/login", None, payload).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);

    // Authenticated routes are not limited.
    let staff = app.user_with_roles("staff@campus.edu", &[Role::Teacher]).await;
    let (status, _) = app.get("/api/auth/me", &staff.token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_uses_envelope() {
    let app = spawn_app().await;

    let (status, body) = app.request(Method::GET, "/api/nope", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}
