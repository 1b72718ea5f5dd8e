//! Domain primitives shared by every layer.
//!
//! Roles, report states and diet quality are closed enumerations stored as
//! lowercase text. Parsing is strict: unknown values are validation errors,
//! never silently mapped to a default.

pub mod email;
pub mod password;

pub use email::Email;
pub use password::Password;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A rejected input value, tagged with the request field it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Parse failure for one of the closed text enumerations below.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

/// Fixed set of permission groups a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Maintenance,
    Wellness,
    Cafeteria,
    Admin,
}

text_enum!(Role, "role", {
    Student => "student",
    Teacher => "teacher",
    Maintenance => "maintenance",
    Wellness => "wellness",
    Cafeteria => "cafeteria",
    Admin => "admin",
});

impl Role {
    /// Roles that handle damage reports on behalf of others.
    pub const REPORT_STAFF: &'static [Self] = &[Self::Maintenance, Self::Admin];

    pub const WELLNESS_STAFF: &'static [Self] = &[Self::Wellness, Self::Admin];

    pub const MENU_STAFF: &'static [Self] = &[Self::Cafeteria, Self::Admin];

    pub const ADMIN_ONLY: &'static [Self] = &[Self::Admin];

    /// Role given to every self-registered account.
    pub const DEFAULT: Self = Self::Student;
}

/// True when `held` and `required` share at least one role.
#[must_use]
pub fn has_any_role(held: &[Role], required: &[Role]) -> bool {
    required.iter().any(|r| held.contains(r))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Verified,
    Escalated,
}

text_enum!(ReportStatus, "report status", {
    Pending => "pending",
    InProgress => "in_progress",
    Resolved => "resolved",
    Verified => "verified",
    Escalated => "escalated",
});

impl ReportStatus {
    /// Closed reports no longer count against their SLA deadline.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Resolved | Self::Verified)
    }
}

/// SLA priority of a damage report. Each maps to one row in `sla_policies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

text_enum!(Priority, "priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

impl Priority {
    /// Hours to respond, used when seeding `sla_policies`.
    #[must_use]
    pub const fn default_response_hours(&self) -> i32 {
        match self {
            Self::Low => 72,
            Self::Medium => 48,
            Self::High => 24,
            Self::Critical => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

text_enum!(DietQuality, "diet quality", {
    Poor => "poor",
    Fair => "fair",
    Good => "good",
    Excellent => "excellent",
});

/// Trims `raw` and checks its length in characters lies within `min..=max`.
pub fn bounded_text(
    raw: &str,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();

    if len < min {
        return Err(if min <= 1 {
            ValidationError::new(field, "Must not be empty")
        } else {
            ValidationError::new(field, format!("Must be at least {min} characters"))
        });
    }
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("Must be at most {max} characters"),
        ));
    }

    Ok(trimmed.to_string())
}

/// Like [`bounded_text`] for optional free text: blank input becomes `None`.
pub fn optional_text(
    raw: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => bounded_text(text, field, 1, max).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_text() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
        assert_eq!(" Admin ".parse::<Role>().unwrap(), Role::Admin);
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_has_any_role() {
        assert!(has_any_role(&[Role::Student, Role::Admin], Role::ADMIN_ONLY));
        assert!(!has_any_role(&[Role::Student, Role::Teacher], Role::ADMIN_ONLY));
        assert!(has_any_role(&[Role::Maintenance], Role::REPORT_STAFF));
        assert!(!has_any_role(&[], Role::MENU_STAFF));
    }

    #[test]
    fn test_report_status_text() {
        assert_eq!(ReportStatus::InProgress.as_str(), "in_progress");
        assert_eq!(
            "in_progress".parse::<ReportStatus>().unwrap(),
            ReportStatus::InProgress
        );
        assert!(ReportStatus::Verified.is_closed());
        assert!(!ReportStatus::Escalated.is_closed());
        assert!("done".parse::<ReportStatus>().is_err());
    }

    #[test]
    fn test_status_serde_matches_text() {
        let json = serde_json::to_string(&ReportStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: DietQuality = serde_json::from_str("\"excellent\"").unwrap();
        assert_eq!(parsed, DietQuality::Excellent);
    }

    #[test]
    fn test_priority_hours_descend() {
        let hours: Vec<i32> = Priority::ALL
            .iter()
            .map(Priority::default_response_hours)
            .collect();
        assert!(hours.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_bounded_text() {
        assert_eq!(bounded_text("  Ada  ", "name", 1, 100).unwrap(), "Ada");
        assert_eq!(bounded_text("   ", "name", 1, 100).unwrap_err().field, "name");
        assert!(bounded_text("short", "description", 10, 2000).is_err());
        assert!(bounded_text(&"x".repeat(101), "name", 1, 100).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None, "comments", 10).unwrap(), None);
        assert_eq!(optional_text(Some("  "), "comments", 10).unwrap(), None);
        assert_eq!(
            optional_text(Some(" ok "), "comments", 10).unwrap().as_deref(),
            Some("ok")
        );
        assert!(optional_text(Some("way too long"), "comments", 5).is_err());
    }
}
