use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::ApiResponse;
use crate::domain::ValidationError;
use crate::services::{
    AuthError, MenuError, NotificationError, ReportError, UserError, WellnessError,
};

/// Path axum puts in front of a data error, as in "target type: stressLevel: invalid value".
static SERDE_PATH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"target type: ([A-Za-z_][A-Za-z0-9_.\[\]]*): ").ok());

/// Field named by serde messages such as "missing field `email`".
static SERDE_FIELD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"field `([A-Za-z0-9_]+)`").ok());

/// Best guess at the request field a JSON body rejection is about.
fn rejected_field(message: &str) -> Option<String> {
    let capture = |re: &LazyLock<Option<Regex>>| {
        re.as_ref()
            .and_then(|re| re.captures(message))
            .map(|c| c[1].to_string())
    };

    capture(&SERDE_PATH).or_else(|| capture(&SERDE_FIELD))
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError {
        message: String,
        field: Option<String>,
    },

    Conflict(String),

    InternalError(String),

    Unauthorized(String),

    Forbidden(String),

    TooManyRequests { retry_after_secs: u64 },

    ServiceUnavailable(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::ValidationError { message, field } => match field {
                Some(field) => write!(f, "Validation error on {field}: {message}"),
                None => write!(f, "Validation error: {message}"),
            },
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::TooManyRequests { retry_after_secs } => {
                write!(f, "Too many requests, retry after {retry_after_secs}s")
            }
            Self::ServiceUnavailable(msg) => write!(f, "Service unavailable: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::<()>::error(msg)),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("A database error occurred"),
                )
            }
            Self::ValidationError { message, field } => (
                StatusCode::BAD_REQUEST,
                ApiResponse::validation_error(message, field),
            ),
            Self::Conflict(msg) => (StatusCode::CONFLICT, ApiResponse::error(msg)),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("An internal error occurred"),
                )
            }
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ApiResponse::error(msg)),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiResponse::error(msg)),
            Self::TooManyRequests { retry_after_secs } => {
                let body = ApiResponse::<()>::error("Too many requests, please try again later");
                let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
                if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }
                return response;
            }
            Self::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, ApiResponse::error(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError {
            message: err.message,
            field: Some(err.field.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let field = rejected_field(&message);

        Self::ValidationError { message, field }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::ExpiredToken => {
                Self::Unauthorized(err.to_string())
            }
            AuthError::EmailTaken => Self::Conflict(err.to_string()),
            AuthError::UserNotFound => Self::NotFound(err.to_string()),
            AuthError::Validation(e) => e.into(),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => Self::NotFound(err.to_string()),
            UserError::Validation(e) => e.into(),
            UserError::Database(msg) => Self::DatabaseError(msg),
            UserError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NotFound | ReportError::FacilityNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ReportError::Forbidden => Self::Forbidden(err.to_string()),
            ReportError::Validation(e) => e.into(),
            ReportError::Duplicate(_) => Self::Conflict(err.to_string()),
            ReportError::Database(msg) => Self::DatabaseError(msg),
            ReportError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<WellnessError> for ApiError {
    fn from(err: WellnessError) -> Self {
        match err {
            WellnessError::Validation(e) => e.into(),
            WellnessError::UserNotFound => Self::NotFound(err.to_string()),
            WellnessError::Database(msg) => Self::DatabaseError(msg),
            WellnessError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<MenuError> for ApiError {
    fn from(err: MenuError) -> Self {
        match err {
            MenuError::NotFound => Self::NotFound(err.to_string()),
            MenuError::Validation(e) => e.into(),
            MenuError::Duplicate(_) => Self::Conflict(err.to_string()),
            MenuError::Database(msg) => Self::DatabaseError(msg),
            MenuError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<NotificationError> for ApiError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::NotFound => Self::NotFound(err.to_string()),
            NotificationError::Database(msg) => Self::DatabaseError(msg),
            NotificationError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError {
            message: msg.into(),
            field: None,
        }
    }

    pub fn field(field: &str, msg: impl Into<String>) -> Self {
        Self::ValidationError {
            message: msg.into(),
            field: Some(field.to_string()),
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden() -> Self {
        Self::Forbidden("You do not have permission to perform this action".to_string())
    }
}
