use serde::Serialize;

pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: i32,
    /// `YYYY-MM-DD`
    pub date: String,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
    pub snack: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct MenuItems {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
    pub snack: Option<String>,
}

/// Meal changes for an update. The outer `None` leaves a meal untouched,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct MenuItemsPatch {
    pub breakfast: Option<Option<String>>,
    pub lunch: Option<Option<String>>,
    pub dinner: Option<Option<String>>,
    pub snack: Option<Option<String>>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct MenuPatch {
    pub date: Option<String>,
    pub items: MenuItemsPatch,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRating {
    pub id: i32,
    pub menu_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comments: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub menu_id: i32,
    pub count: usize,
    pub average: Option<f64>,
    pub ratings: Vec<MenuRating>,
}
