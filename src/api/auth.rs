use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ValidJson;
use super::validation::require_non_empty;
use super::{AccessTokenResponse, ApiError, ApiResponse, AppState, MessageResponse};
use crate::domain::Role;
use crate::models::user::{AuthenticatedUser, User};
use crate::services::AuthSession;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves `Authorization: Bearer <access token>` to an [`AuthenticatedUser`]
/// and stores it in the request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

    let user = state.auth().authenticate(token).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Rejects callers holding none of `required`. Must run after [`auth_middleware`].
pub async fn require_roles(
    State(required): State<&'static [Role]>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let allowed = request
        .extensions()
        .get::<AuthenticatedUser>()
        .is_some_and(|user| user.has_any_role(required));

    if !allowed {
        return Err(ApiError::forbidden());
    }

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();

    (!token.is_empty()).then_some(token)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthSession>>), ApiError> {
    require_non_empty(&payload.email, "email")?;
    require_non_empty(&payload.password, "password")?;

    let session = state
        .auth()
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(session))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthSession>>, ApiError> {
    require_non_empty(&payload.email, "email")?;
    require_non_empty(&payload.password, "password")?;

    let session = state
        .auth()
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(session)))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<RefreshRequest>,
) -> Result<Json<ApiResponse<AccessTokenResponse>>, ApiError> {
    require_non_empty(&payload.refresh_token, "refreshToken")?;

    let access_token = state.auth().refresh(payload.refresh_token.trim()).await?;

    Ok(Json(ApiResponse::success(AccessTokenResponse {
        access_token,
    })))
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.auth().me(user.id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /auth/password
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidJson(payload): ValidJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_non_empty(&payload.current_password, "currentPassword")?;

    state
        .auth()
        .change_password(user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password changed successfully",
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer_token(&headers("bearer  xyz ")), Some("xyz"));
        assert_eq!(extract_bearer_token(&headers("Basic abc")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer ")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }
}
