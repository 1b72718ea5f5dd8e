use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::{ValidPath, ValidQuery};
use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, UpdatedCount};
use crate::models::notification::Notification;
use crate::models::user::AuthenticatedUser;

#[derive(Deserialize, Default)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread: bool,
}

/// GET /notifications
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidQuery(query): ValidQuery<NotificationQuery>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state.notifications().list(user.id, query.unread).await?;
    Ok(Json(ApiResponse::success(notifications)))
}

/// PATCH /notifications/{id}/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let id = validate_id(id, "id")?;
    let notification = state.notifications().mark_read(user.id, id).await?;
    Ok(Json(ApiResponse::success(notification)))
}

/// POST /notifications/read-all
pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UpdatedCount>>, ApiError> {
    let updated = state.notifications().mark_all_read(user.id).await?;
    Ok(Json(ApiResponse::success(UpdatedCount { updated })))
}
