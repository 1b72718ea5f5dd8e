//! `SeaORM` implementation of the `WellnessService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::Store;
use crate::domain::{Role, ValidationError, optional_text};
use crate::models::notification::{NewNotification, NotificationKind};
use crate::models::user::AuthenticatedUser;
use crate::models::wellness::{
    HIGH_STRESS_THRESHOLD, NewWellnessRecord, SLEEP_RANGE, STRESS_RANGE, WellnessRecord,
    WellnessSummary,
};
use crate::services::notification_service::NotificationService;
use crate::services::wellness_service::{CreateWellnessRecord, WellnessError, WellnessService};

const COMMENTS_MAX_LEN: usize = 1000;

/// Upper bound on `limit` for record listings.
pub const MAX_LIST_LIMIT: u64 = 500;

pub struct SeaOrmWellnessService {
    store: Store,
    notifications: Arc<dyn NotificationService>,
}

impl SeaOrmWellnessService {
    #[must_use]
    pub fn new(store: Store, notifications: Arc<dyn NotificationService>) -> Self {
        Self {
            store,
            notifications,
        }
    }

    fn validate(input: &CreateWellnessRecord) -> Result<(), ValidationError> {
        if !STRESS_RANGE.contains(&input.stress_level) {
            return Err(ValidationError::new(
                "stressLevel",
                format!(
                    "Stress level must be between {} and {}",
                    STRESS_RANGE.start(),
                    STRESS_RANGE.end()
                ),
            ));
        }

        if !input.sleep_hours.is_finite() || !SLEEP_RANGE.contains(&input.sleep_hours) {
            return Err(ValidationError::new(
                "sleepHours",
                format!(
                    "Sleep hours must be between {} and {}",
                    SLEEP_RANGE.start(),
                    SLEEP_RANGE.end()
                ),
            ));
        }

        Ok(())
    }

    fn clamp_limit(limit: Option<u64>) -> Option<u64> {
        limit.map(|l| l.min(MAX_LIST_LIMIT))
    }
}

#[async_trait]
impl WellnessService for SeaOrmWellnessService {
    async fn create(
        &self,
        actor: &AuthenticatedUser,
        input: CreateWellnessRecord,
    ) -> Result<WellnessRecord, WellnessError> {
        Self::validate(&input)?;
        let comments = optional_text(input.comments.as_deref(), "comments", COMMENTS_MAX_LEN)?;

        let record = self
            .store
            .wellness()
            .create(NewWellnessRecord {
                user_id: actor.id,
                stress_level: input.stress_level,
                sleep_hours: input.sleep_hours,
                diet_quality: input.diet_quality,
                comments,
            })
            .await?;

        info!(record_id = record.id, user_id = actor.id, "Wellness record created");

        if record.stress_level >= HIGH_STRESS_THRESHOLD {
            let alert = NewNotification {
                kind: NotificationKind::HighStress,
                title: "High stress check-in".to_string(),
                message: format!(
                    "{} reported a stress level of {}",
                    actor.name, record.stress_level
                ),
            };
            if let Err(e) = self.notifications.notify_role(Role::Wellness, alert).await {
                warn!(record_id = record.id, "Failed to notify wellness staff: {}", e);
            }
        }

        Ok(record)
    }

    async fn list_mine(
        &self,
        actor: &AuthenticatedUser,
        limit: Option<u64>,
    ) -> Result<Vec<WellnessRecord>, WellnessError> {
        Ok(self
            .store
            .wellness()
            .list_for_user(actor.id, Self::clamp_limit(limit))
            .await?)
    }

    async fn list_for_user(
        &self,
        user_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<WellnessRecord>, WellnessError> {
        if self.store.users().get_by_id(user_id).await?.is_none() {
            return Err(WellnessError::UserNotFound);
        }

        Ok(self
            .store
            .wellness()
            .list_for_user(user_id, Self::clamp_limit(limit))
            .await?)
    }

    async fn summary(&self, user_id: i32) -> Result<WellnessSummary, WellnessError> {
        if self.store.users().get_by_id(user_id).await?.is_none() {
            return Err(WellnessError::UserNotFound);
        }

        Ok(self.store.wellness().summary_for_user(user_id).await?)
    }
}
