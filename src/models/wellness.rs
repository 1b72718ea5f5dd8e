use serde::Serialize;

use crate::domain::DietQuality;

pub const STRESS_RANGE: std::ops::RangeInclusive<i32> = 0..=5;

pub const SLEEP_RANGE: std::ops::RangeInclusive<f64> = 0.0..=24.0;

/// Stress level at or above which wellness staff are alerted.
pub const HIGH_STRESS_THRESHOLD: i32 = 4;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessRecord {
    pub id: i32,
    pub user_id: i32,
    pub stress_level: i32,
    pub sleep_hours: f64,
    pub diet_quality: DietQuality,
    pub comments: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewWellnessRecord {
    pub user_id: i32,
    pub stress_level: i32,
    pub sleep_hours: f64,
    pub diet_quality: DietQuality,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessSummary {
    pub user_id: i32,
    pub record_count: usize,
    pub average_stress: Option<f64>,
    pub average_sleep: Option<f64>,
    pub latest_at: Option<String>,
}
