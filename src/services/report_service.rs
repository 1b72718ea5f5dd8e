//! Domain service for facilities and damage reports.

use thiserror::Error;

use crate::db::StoreError;
use crate::domain::{Priority, ReportStatus, ValidationError};
use crate::models::report::{Facility, Report, ReportFilter, SlaPolicy};
use crate::models::user::AuthenticatedUser;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report not found")]
    NotFound,

    #[error("Facility {0} not found")]
    FacilityNotFound(i32),

    #[error("You do not have access to this report")]
    Forbidden,

    #[error("{0}")]
    Validation(ValidationError),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ReportError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for ReportError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(what) => Self::Duplicate(what),
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::Database(e) => Self::Database(e.to_string()),
            StoreError::Internal(e) => Self::Internal(e.to_string()),
        }
    }
}

/// Input for a new damage report.
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub facility_id: i32,
    pub priority: Priority,
    pub description: String,
}

#[async_trait::async_trait]
pub trait ReportService: Send + Sync {
    async fn list_facilities(&self) -> Result<Vec<Facility>, ReportError>;

    async fn create_facility(
        &self,
        name: &str,
        location: Option<&str>,
    ) -> Result<Facility, ReportError>;

    /// SLA policies, slowest response first.
    async fn list_priorities(&self) -> Result<Vec<SlaPolicy>, ReportError>;

    /// Files a report with status `pending` and a deadline from the priority's SLA.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::FacilityNotFound`] for an unknown facility and
    /// [`ReportError::Validation`] for a description outside 10 to 2000 characters.
    async fn create(
        &self,
        actor: &AuthenticatedUser,
        input: CreateReport,
    ) -> Result<Report, ReportError>;

    /// Reporters see their own reports; report staff see every report.
    async fn get(&self, actor: &AuthenticatedUser, id: i32) -> Result<Report, ReportError>;

    /// Non-staff callers only ever see their own reports, whatever the filter says.
    async fn list(
        &self,
        actor: &AuthenticatedUser,
        filter: ReportFilter,
    ) -> Result<Vec<Report>, ReportError>;

    /// Moves a report to `status` and notifies its reporter.
    async fn update_status(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        status: ReportStatus,
    ) -> Result<Report, ReportError>;
}
