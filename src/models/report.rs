use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Priority, ReportStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaPolicy {
    pub id: i32,
    pub priority: Priority,
    pub response_hours: i32,
}

/// A facility damage report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i32,
    pub facility_id: i32,
    pub facility_name: Option<String>,
    pub user_id: i32,
    pub priority: Priority,
    pub description: String,
    pub status: ReportStatus,
    pub created_at: String,
    pub updated_at: String,
    pub due_at: String,
    /// Open past its SLA deadline at the time it was read
    pub overdue: bool,
}

/// Whether an open report has passed its deadline. Unparseable deadlines count as not overdue.
#[must_use]
pub fn is_overdue(status: ReportStatus, due_at: &str, now: DateTime<Utc>) -> bool {
    if status.is_closed() {
        return false;
    }

    DateTime::parse_from_rfc3339(due_at).is_ok_and(|due| now > due)
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub facility_id: i32,
    pub user_id: i32,
    pub priority_id: i32,
    pub description: String,
    pub due_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub user_id: Option<i32>,
    pub status: Option<ReportStatus>,
    pub facility_id: Option<i32>,
}
