use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::{ValidJson, ValidPath, ValidQuery};
use super::validation::{parse_enum, validate_id};
use super::{ApiError, ApiResponse, AppState};
use crate::domain::DietQuality;
use crate::models::user::AuthenticatedUser;
use crate::models::wellness::{WellnessRecord, WellnessSummary};
use crate::services::CreateWellnessRecord;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    pub stress_level: i32,
    pub sleep_hours: f64,
    pub diet_quality: String,
    pub comments: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct LimitQuery {
    pub limit: Option<u64>,
}

/// POST /wellness/records
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidJson(payload): ValidJson<CreateRecordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WellnessRecord>>), ApiError> {
    let diet_quality = parse_enum::<DietQuality>(&payload.diet_quality, "dietQuality")?;

    let record = state
        .wellness()
        .create(
            &user,
            CreateWellnessRecord {
                stress_level: payload.stress_level,
                sleep_hours: payload.sleep_hours,
                diet_quality,
                comments: payload.comments,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))))
}

/// GET /wellness/records
pub async fn list_my_records(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidQuery(query): ValidQuery<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<WellnessRecord>>>, ApiError> {
    let records = state.wellness().list_mine(&user, query.limit).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// GET /wellness/summary
pub async fn my_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<WellnessSummary>>, ApiError> {
    let summary = state.wellness().summary(user.id).await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// GET /wellness/users/{id}/records
pub async fn list_user_records(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
    ValidQuery(query): ValidQuery<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<WellnessRecord>>>, ApiError> {
    let id = validate_id(id, "id")?;
    let records = state.wellness().list_for_user(id, query.limit).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// GET /wellness/users/{id}/summary
pub async fn user_summary(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<ApiResponse<WellnessSummary>>, ApiError> {
    let id = validate_id(id, "id")?;
    let summary = state.wellness().summary(id).await?;
    Ok(Json(ApiResponse::success(summary)))
}
