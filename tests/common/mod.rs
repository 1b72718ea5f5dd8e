#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use campusdesk::api::AppState;
use campusdesk::config::Config;
use campusdesk::domain::Role;
use campusdesk::services::TokenKind;
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse";

/// A router over its own throwaway SQLite file.
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub fn test_config() -> (Config, PathBuf) {
    let db_path =
        std::env::temp_dir().join(format!("campusdesk-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_url = format!("sqlite://{}?mode=rwc", db_path.display());
    config.auth.jwt_secret = "test-access-secret".to_string();
    config.auth.jwt_refresh_secret = "test-refresh-secret".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.rate_limit.max_requests = 1000;

    (config, db_path)
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    let (mut config, db_path) = test_config();
    customize(&mut config);

    let state = campusdesk::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    let router = campusdesk::api::router(state.clone());

    TestApp {
        router,
        state,
        db_path,
    }
}

/// An account plus a valid access token for it.
pub struct TestUser {
    pub id: i32,
    pub email: String,
    pub token: String,
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_string(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Registers through the public endpoint and returns the new student.
    pub async fn register(&self, name: &str, email: &str) -> TestUser {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                serde_json::json!({"name": name, "email": email, "password": PASSWORD}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

        TestUser {
            id: body["data"]["user"]["id"].as_i64().unwrap() as i32,
            email: email.to_string(),
            token: body["data"]["accessToken"].as_str().unwrap().to_string(),
        }
    }

    /// Creates an account holding `roles` directly through the auth service.
    pub async fn user_with_roles(&self, email: &str, roles: &[Role]) -> TestUser {
        let user = self
            .state
            .auth()
            .create_account("Staff Member", email, PASSWORD, roles)
            .await
            .expect("Failed to create user");

        let token = self
            .state
            .tokens()
            .issue(&user, TokenKind::Access)
            .expect("Failed to issue token");

        TestUser {
            id: user.id,
            email: user.email,
            token,
        }
    }

    pub async fn admin(&self) -> TestUser {
        self.user_with_roles("admin@campus.edu", &[Role::Admin])
            .await
    }
}
