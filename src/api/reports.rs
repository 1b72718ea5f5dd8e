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
use crate::domain::{Priority, ReportStatus};
use crate::models::report::{Facility, Report, ReportFilter, SlaPolicy};
use crate::models::user::AuthenticatedUser;
use crate::services::CreateReport;

#[derive(Deserialize)]
pub struct CreateFacilityRequest {
    pub name: String,
    pub location: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub facility_id: i32,
    /// Defaults to medium
    pub priority: Option<String>,
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportListQuery {
    pub status: Option<String>,
    pub facility_id: Option<i32>,
    pub user_id: Option<i32>,
}

/// GET /facilities
pub async fn list_facilities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Facility>>>, ApiError> {
    let facilities = state.reports().list_facilities().await?;
    Ok(Json(ApiResponse::success(facilities)))
}

/// POST /facilities
pub async fn create_facility(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<CreateFacilityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Facility>>), ApiError> {
    let facility = state
        .reports()
        .create_facility(&payload.name, payload.location.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(facility))))
}

/// GET /reports/priorities
pub async fn list_priorities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SlaPolicy>>>, ApiError> {
    let policies = state.reports().list_priorities().await?;
    Ok(Json(ApiResponse::success(policies)))
}

/// POST /reports
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidJson(payload): ValidJson<CreateReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Report>>), ApiError> {
    let facility_id = validate_id(payload.facility_id, "facilityId")?;
    let priority = match payload.priority.as_deref() {
        Some(raw) => parse_enum::<Priority>(raw, "priority")?,
        None => Priority::Medium,
    };

    let report = state
        .reports()
        .create(
            &user,
            CreateReport {
                facility_id,
                priority,
                description: payload.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(report))))
}

/// GET /reports
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidQuery(query): ValidQuery<ReportListQuery>,
) -> Result<Json<ApiResponse<Vec<Report>>>, ApiError> {
    let filter = ReportFilter {
        user_id: query.user_id,
        status: query
            .status
            .as_deref()
            .map(|s| parse_enum::<ReportStatus>(s, "status"))
            .transpose()?,
        facility_id: query.facility_id,
    };

    let reports = state.reports().list(&user, filter).await?;
    Ok(Json(ApiResponse::success(reports)))
}

/// GET /reports/{id}
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<ApiResponse<Report>>, ApiError> {
    let id = validate_id(id, "id")?;
    let report = state.reports().get(&user, id).await?;
    Ok(Json(ApiResponse::success(report)))
}

/// PATCH /reports/{id}/status
pub async fn update_report_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(payload): ValidJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Report>>, ApiError> {
    let id = validate_id(id, "id")?;
    let status = parse_enum::<ReportStatus>(&payload.status, "status")?;

    let report = state.reports().update_status(&user, id, status).await?;
    Ok(Json(ApiResponse::success(report)))
}
