use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

use super::extract::{ValidJson, ValidPath, ValidQuery};
use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState};
use crate::models::menu::{Menu, MenuItems, MenuItemsPatch, MenuPatch, MenuRating, RatingSummary};
use crate::models::user::AuthenticatedUser;

#[derive(Deserialize)]
pub struct CreateMenuRequest {
    pub date: String,
    #[serde(flatten)]
    pub items: MenuItemsBody,
}

/// Meal texts for a new menu; absent fields stay empty.
#[derive(Deserialize, Default)]
pub struct MenuItemsBody {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
    pub snack: Option<String>,
}

impl From<MenuItemsBody> for MenuItems {
    fn from(body: MenuItemsBody) -> Self {
        Self {
            breakfast: body.breakfast,
            lunch: body.lunch,
            dinner: body.dinner,
            snack: body.snack,
        }
    }
}

/// Absent meals stay as they are; `null` or a blank string clears them.
#[derive(Deserialize, Default)]
pub struct UpdateMenuRequest {
    pub date: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub breakfast: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub lunch: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub dinner: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub snack: Option<Option<String>>,
}

/// Present keys become `Some`, so an explicit `null` reads as `Some(None)`.
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
pub struct RateMenuRequest {
    pub rating: i32,
    pub comments: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct DateRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /menus
pub async fn list_menus(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<Menu>>>, ApiError> {
    let menus = state
        .menus()
        .list(query.from.as_deref(), query.to.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(menus)))
}

/// GET /menus/today
pub async fn today(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Menu>>, ApiError> {
    let menu = state.menus().today().await?;
    Ok(Json(ApiResponse::success(menu)))
}

/// GET /menus/date/{date}
pub async fn get_menu_by_date(
    State(state): State<Arc<AppState>>,
    ValidPath(date): ValidPath<String>,
) -> Result<Json<ApiResponse<Menu>>, ApiError> {
    let menu = state.menus().get_by_date(&date).await?;
    Ok(Json(ApiResponse::success(menu)))
}

/// GET /menus/{id}
pub async fn get_menu(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<ApiResponse<Menu>>, ApiError> {
    let id = validate_id(id, "id")?;
    let menu = state.menus().get(id).await?;
    Ok(Json(ApiResponse::success(menu)))
}

/// POST /menus
pub async fn create_menu(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<CreateMenuRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Menu>>), ApiError> {
    let menu = state
        .menus()
        .create(&payload.date, payload.items.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(menu))))
}

/// PUT /menus/{id}
pub async fn update_menu(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(payload): ValidJson<UpdateMenuRequest>,
) -> Result<Json<ApiResponse<Menu>>, ApiError> {
    let id = validate_id(id, "id")?;
    let patch = MenuPatch {
        date: payload.date,
        items: MenuItemsPatch {
            breakfast: payload.breakfast,
            lunch: payload.lunch,
            dinner: payload.dinner,
            snack: payload.snack,
        },
    };

    let menu = state.menus().update(id, patch).await?;
    Ok(Json(ApiResponse::success(menu)))
}

/// POST /menus/{id}/ratings
pub async fn rate_menu(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(payload): ValidJson<RateMenuRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MenuRating>>), ApiError> {
    let id = validate_id(id, "id")?;
    let rating = state
        .menus()
        .rate(&user, id, payload.rating, payload.comments)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(rating))))
}

/// GET /menus/{id}/ratings
pub async fn list_ratings(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<ApiResponse<RatingSummary>>, ApiError> {
    let id = validate_id(id, "id")?;
    let summary = state.menus().ratings(id).await?;
    Ok(Json(ApiResponse::success(summary)))
}
