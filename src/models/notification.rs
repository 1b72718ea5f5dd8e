use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

/// What triggered a notification. Stored as text in `notifications.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    ReportCreated,
    ReportStatusChanged,
    HighStress,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReportCreated => "report_created",
            Self::ReportStatusChanged => "report_status_changed",
            Self::HighStress => "high_stress",
        }
    }
}

/// A message addressed to one or more users.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}
