use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

use crate::db::{StoreError, StoreResult};
use crate::domain::{Priority, ReportStatus};
use crate::entities::{facilities, prelude::*, reports, sla_policies};
use crate::models::report::{NewReport, Report, ReportFilter, SlaPolicy, is_overdue};

pub struct ReportRepository {
    conn: DatabaseConnection,
}

impl ReportRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_sla(model: sla_policies::Model) -> StoreResult<SlaPolicy> {
        let priority = model
            .priority
            .parse::<Priority>()
            .map_err(|e| StoreError::Internal(e.into()))?;

        Ok(SlaPolicy {
            id: model.id,
            priority,
            response_hours: model.response_hours,
        })
    }

    fn map_model(
        model: reports::Model,
        facility: Option<facilities::Model>,
        priorities: &HashMap<i32, Priority>,
    ) -> StoreResult<Report> {
        let status = model
            .status
            .parse::<ReportStatus>()
            .map_err(|e| StoreError::Internal(e.into()))?;

        let priority = priorities.get(&model.priority_id).copied().ok_or_else(|| {
            StoreError::Internal(anyhow::anyhow!(
                "Report {} references unknown SLA policy {}",
                model.id,
                model.priority_id
            ))
        })?;

        let overdue = is_overdue(status, &model.due_at, chrono::Utc::now());

        Ok(Report {
            id: model.id,
            facility_id: model.facility_id,
            facility_name: facility.map(|f| f.name),
            user_id: model.user_id,
            priority,
            description: model.description,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
            due_at: model.due_at,
            overdue,
        })
    }

    async fn priority_map(&self) -> StoreResult<HashMap<i32, Priority>> {
        Ok(self
            .list_sla_policies()
            .await?
            .into_iter()
            .map(|p| (p.id, p.priority))
            .collect())
    }

    pub async fn list_sla_policies(&self) -> StoreResult<Vec<SlaPolicy>> {
        let models = SlaPolicies::find()
            .order_by_desc(sla_policies::Column::ResponseHours)
            .all(&self.conn)
            .await?;

        models.into_iter().map(Self::map_sla).collect()
    }

    pub async fn sla_for_priority(&self, priority: Priority) -> StoreResult<Option<SlaPolicy>> {
        let model = SlaPolicies::find()
            .filter(sla_policies::Column::Priority.eq(priority.as_str()))
            .one(&self.conn)
            .await?;

        model.map(Self::map_sla).transpose()
    }

    pub async fn create(&self, report: NewReport) -> StoreResult<Report> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = reports::ActiveModel {
            facility_id: Set(report.facility_id),
            user_id: Set(report.user_id),
            priority_id: Set(report.priority_id),
            description: Set(report.description),
            status: Set(ReportStatus::Pending.as_str().to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            due_at: Set(report.due_at),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .map_err(|e| StoreError::from_write(e, "Report"))?;

        let id = model.id;
        self.get(id)
            .await?
            .ok_or(StoreError::not_found("Report", id))
    }

    pub async fn get(&self, id: i32) -> StoreResult<Option<Report>> {
        let row = Reports::find_by_id(id)
            .find_also_related(Facilities)
            .one(&self.conn)
            .await?;

        let Some((model, facility)) = row else {
            return Ok(None);
        };

        let priorities = self.priority_map().await?;
        Self::map_model(model, facility, &priorities).map(Some)
    }

    /// Newest first.
    pub async fn list(&self, filter: &ReportFilter) -> StoreResult<Vec<Report>> {
        let mut query = Reports::find();

        if let Some(user_id) = filter.user_id {
            query = query.filter(reports::Column::UserId.eq(user_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(reports::Column::Status.eq(status.as_str()));
        }
        if let Some(facility_id) = filter.facility_id {
            query = query.filter(reports::Column::FacilityId.eq(facility_id));
        }

        let rows = query
            .find_also_related(Facilities)
            .order_by_desc(reports::Column::CreatedAt)
            .order_by_desc(reports::Column::Id)
            .all(&self.conn)
            .await?;

        let priorities = self.priority_map().await?;
        rows.into_iter()
            .map(|(model, facility)| Self::map_model(model, facility, &priorities))
            .collect()
    }

    pub async fn update_status(&self, id: i32, status: ReportStatus) -> StoreResult<Report> {
        let model = Reports::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or(StoreError::not_found("Report", id))?;

        let mut active: reports::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        self.get(id)
            .await?
            .ok_or(StoreError::not_found("Report", id))
    }
}
