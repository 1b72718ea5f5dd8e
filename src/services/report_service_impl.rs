//! `SeaORM` implementation of the `ReportService` trait.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::Store;
use crate::domain::{ReportStatus, Role, bounded_text, optional_text};
use crate::models::notification::{NewNotification, NotificationKind};
use crate::models::report::{Facility, NewReport, Report, ReportFilter, SlaPolicy};
use crate::models::user::AuthenticatedUser;
use crate::services::notification_service::NotificationService;
use crate::services::report_service::{CreateReport, ReportError, ReportService};

pub const DESCRIPTION_MIN_LEN: usize = 10;
pub const DESCRIPTION_MAX_LEN: usize = 2000;

const FACILITY_NAME_MAX_LEN: usize = 100;
const LOCATION_MAX_LEN: usize = 200;

pub struct SeaOrmReportService {
    store: Store,
    notifications: Arc<dyn NotificationService>,
}

impl SeaOrmReportService {
    #[must_use]
    pub fn new(store: Store, notifications: Arc<dyn NotificationService>) -> Self {
        Self {
            store,
            notifications,
        }
    }

    fn is_staff(actor: &AuthenticatedUser) -> bool {
        actor.has_any_role(Role::REPORT_STAFF)
    }
}

#[async_trait]
impl ReportService for SeaOrmReportService {
    async fn list_facilities(&self) -> Result<Vec<Facility>, ReportError> {
        Ok(self.store.facilities().list().await?)
    }

    async fn create_facility(
        &self,
        name: &str,
        location: Option<&str>,
    ) -> Result<Facility, ReportError> {
        let name = bounded_text(name, "name", 1, FACILITY_NAME_MAX_LEN)?;
        let location = optional_text(location, "location", LOCATION_MAX_LEN)?;

        let facility = self
            .store
            .facilities()
            .create(&name, location.as_deref())
            .await?;

        info!(facility_id = facility.id, name = %facility.name, "Facility created");
        Ok(facility)
    }

    async fn list_priorities(&self) -> Result<Vec<SlaPolicy>, ReportError> {
        Ok(self.store.reports().list_sla_policies().await?)
    }

    async fn create(
        &self,
        actor: &AuthenticatedUser,
        input: CreateReport,
    ) -> Result<Report, ReportError> {
        let description = bounded_text(
            &input.description,
            "description",
            DESCRIPTION_MIN_LEN,
            DESCRIPTION_MAX_LEN,
        )?;

        let facility = self
            .store
            .facilities()
            .get(input.facility_id)
            .await?
            .ok_or(ReportError::FacilityNotFound(input.facility_id))?;

        let reports = self.store.reports();
        let sla = reports
            .sla_for_priority(input.priority)
            .await?
            .ok_or_else(|| {
                ReportError::Internal(format!("No SLA policy for priority {}", input.priority))
            })?;

        let due_at = Utc::now() + Duration::hours(i64::from(sla.response_hours));
        let report = reports
            .create(NewReport {
                facility_id: facility.id,
                user_id: actor.id,
                priority_id: sla.id,
                description,
                due_at: due_at.to_rfc3339(),
            })
            .await?;

        info!(
            report_id = report.id,
            facility_id = facility.id,
            priority = %report.priority,
            "Report created"
        );

        let alert = NewNotification {
            kind: NotificationKind::ReportCreated,
            title: format!("New {} priority report", report.priority),
            message: format!("{}: {}", facility.name, report.description),
        };
        if let Err(e) = self
            .notifications
            .notify_role(Role::Maintenance, alert)
            .await
        {
            warn!(report_id = report.id, "Failed to notify maintenance staff: {}", e);
        }

        Ok(report)
    }

    async fn get(&self, actor: &AuthenticatedUser, id: i32) -> Result<Report, ReportError> {
        let report = self
            .store
            .reports()
            .get(id)
            .await?
            .ok_or(ReportError::NotFound)?;

        if report.user_id != actor.id && !Self::is_staff(actor) {
            return Err(ReportError::Forbidden);
        }

        Ok(report)
    }

    async fn list(
        &self,
        actor: &AuthenticatedUser,
        mut filter: ReportFilter,
    ) -> Result<Vec<Report>, ReportError> {
        if !Self::is_staff(actor) {
            filter.user_id = Some(actor.id);
        }

        Ok(self.store.reports().list(&filter).await?)
    }

    async fn update_status(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        status: ReportStatus,
    ) -> Result<Report, ReportError> {
        let report = self.store.reports().update_status(id, status).await?;

        info!(
            report_id = id,
            status = %status,
            actor_id = actor.id,
            "Report status updated"
        );

        let alert = NewNotification {
            kind: NotificationKind::ReportStatusChanged,
            title: "Report status updated".to_string(),
            message: format!("Your report #{} is now {}", report.id, report.status),
        };
        if let Err(e) = self.notifications.notify(&[report.user_id], alert).await {
            warn!(report_id = id, "Failed to notify reporter: {}", e);
        }

        Ok(report)
    }
}
