//! Domain service for wellness check-ins.

use thiserror::Error;

use crate::db::StoreError;
use crate::domain::{DietQuality, ValidationError};
use crate::models::user::AuthenticatedUser;
use crate::models::wellness::{WellnessRecord, WellnessSummary};

#[derive(Debug, Error)]
pub enum WellnessError {
    #[error("{0}")]
    Validation(ValidationError),

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for WellnessError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for WellnessError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::UserNotFound,
            StoreError::Conflict(what) => Self::Internal(format!("{what} already exists")),
            StoreError::Database(e) => Self::Database(e.to_string()),
            StoreError::Internal(e) => Self::Internal(e.to_string()),
        }
    }
}

/// A check-in as submitted by its owner.
#[derive(Debug, Clone)]
pub struct CreateWellnessRecord {
    pub stress_level: i32,
    pub sleep_hours: f64,
    pub diet_quality: DietQuality,
    pub comments: Option<String>,
}

#[async_trait::async_trait]
pub trait WellnessService: Send + Sync {
    /// # Errors
    ///
    /// Returns [`WellnessError::Validation`] naming `stressLevel` or `sleepHours`
    /// when a value is out of range. Nothing is written in that case.
    async fn create(
        &self,
        actor: &AuthenticatedUser,
        input: CreateWellnessRecord,
    ) -> Result<WellnessRecord, WellnessError>;

    /// The caller's own records, newest first.
    async fn list_mine(
        &self,
        actor: &AuthenticatedUser,
        limit: Option<u64>,
    ) -> Result<Vec<WellnessRecord>, WellnessError>;

    /// Another user's records, for wellness staff.
    async fn list_for_user(
        &self,
        user_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<WellnessRecord>, WellnessError>;

    async fn summary(&self, user_id: i32) -> Result<WellnessSummary, WellnessError>;
}
