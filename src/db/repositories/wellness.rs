use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::db::{StoreError, StoreResult};
use crate::domain::DietQuality;
use crate::entities::{prelude::*, wellness_records};
use crate::models::wellness::{NewWellnessRecord, WellnessRecord, WellnessSummary};

#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    record_count: i64,
    average_stress: Option<f64>,
    average_sleep: Option<f64>,
    latest_at: Option<String>,
}

pub struct WellnessRepository {
    conn: DatabaseConnection,
}

impl WellnessRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: wellness_records::Model) -> StoreResult<WellnessRecord> {
        let diet_quality = model
            .diet_quality
            .parse::<DietQuality>()
            .map_err(|e| StoreError::Internal(e.into()))?;

        Ok(WellnessRecord {
            id: model.id,
            user_id: model.user_id,
            stress_level: model.stress_level,
            sleep_hours: model.sleep_hours,
            diet_quality,
            comments: model.comments,
            created_at: model.created_at,
        })
    }

    pub async fn create(&self, record: NewWellnessRecord) -> StoreResult<WellnessRecord> {
        let model = wellness_records::ActiveModel {
            user_id: Set(record.user_id),
            stress_level: Set(record.stress_level),
            sleep_hours: Set(record.sleep_hours),
            diet_quality: Set(record.diet_quality.as_str().to_string()),
            comments: Set(record.comments),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .map_err(|e| StoreError::from_write(e, "Wellness record"))?;

        Self::map_model(model)
    }

    /// Newest first, at most `limit` rows when given.
    pub async fn list_for_user(
        &self,
        user_id: i32,
        limit: Option<u64>,
    ) -> StoreResult<Vec<WellnessRecord>> {
        let models = WellnessRecords::find()
            .filter(wellness_records::Column::UserId.eq(user_id))
            .order_by_desc(wellness_records::Column::CreatedAt)
            .order_by_desc(wellness_records::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    /// Count, averages and latest check-in, computed in one aggregate query.
    pub async fn summary_for_user(&self, user_id: i32) -> StoreResult<WellnessSummary> {
        let row = WellnessRecords::find()
            .select_only()
            .column_as(wellness_records::Column::Id.count(), "record_count")
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col(wellness_records::Column::StressLevel))),
                "average_stress",
            )
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col(wellness_records::Column::SleepHours))),
                "average_sleep",
            )
            .column_as(
                SimpleExpr::from(Func::max(Expr::col(wellness_records::Column::CreatedAt))),
                "latest_at",
            )
            .filter(wellness_records::Column::UserId.eq(user_id))
            .into_model::<SummaryRow>()
            .one(&self.conn)
            .await?;

        let Some(row) = row else {
            return Ok(WellnessSummary {
                user_id,
                record_count: 0,
                average_stress: None,
                average_sleep: None,
                latest_at: None,
            });
        };

        Ok(WellnessSummary {
            user_id,
            record_count: usize::try_from(row.record_count).unwrap_or_default(),
            average_stress: row.average_stress,
            average_sleep: row.average_sleep,
            latest_at: row.latest_at,
        })
    }
}
