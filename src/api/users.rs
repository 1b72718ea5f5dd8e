use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::{ValidJson, ValidPath, ValidQuery};
use super::validation::{parse_enum, parse_enum_list, validate_id};
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::domain::Role;
use crate::models::user::{AuthenticatedUser, User, UserFilter};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub role: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Deserialize)]
pub struct SetRolesRequest {
    pub roles: Vec<String>,
}

#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<UserListQuery>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let filter = UserFilter {
        role: query
            .role
            .as_deref()
            .map(|r| parse_enum::<Role>(r, "role"))
            .transpose()?,
        include_inactive: query.include_inactive,
    };

    let users = state.users().list(filter).await?;
    Ok(Json(ApiResponse::success(users)))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = validate_id(id, "id")?;
    let user = state.users().get(id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /users/{id}/roles
pub async fn set_roles(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthenticatedUser>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(payload): ValidJson<SetRolesRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = validate_id(id, "id")?;
    let roles = parse_enum_list::<Role>(&payload.roles, "roles")?;

    let user = state.users().set_roles(&actor, id, roles).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PATCH /users/{id}/active
pub async fn set_active(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthenticatedUser>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(payload): ValidJson<SetActiveRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = validate_id(id, "id")?;
    let user = state.users().set_active(&actor, id, payload.active).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthenticatedUser>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id, "id")?;
    state.users().delete(&actor, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "User {id} deleted"
    )))))
}
