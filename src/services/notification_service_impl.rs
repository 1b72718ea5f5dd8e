//! `SeaORM` implementation of the `NotificationService` trait.

use async_trait::async_trait;
use tracing::debug;

use crate::db::Store;
use crate::domain::Role;
use crate::models::notification::{NewNotification, Notification};
use crate::services::notification_service::{NotificationError, NotificationService};

pub struct SeaOrmNotificationService {
    store: Store,
}

impl SeaOrmNotificationService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NotificationService for SeaOrmNotificationService {
    async fn notify(
        &self,
        user_ids: &[i32],
        notification: NewNotification,
    ) -> Result<usize, NotificationError> {
        let written = self
            .store
            .notifications()
            .create_many(user_ids, &notification)
            .await?;

        debug!(
            kind = notification.kind.as_str(),
            recipients = written,
            "Notifications stored"
        );
        Ok(written)
    }

    async fn notify_role(
        &self,
        role: Role,
        notification: NewNotification,
    ) -> Result<usize, NotificationError> {
        let user_ids = self.store.users().ids_with_role(role).await?;
        self.notify(&user_ids, notification).await
    }

    async fn list(
        &self,
        user_id: i32,
        unread_only: bool,
    ) -> Result<Vec<Notification>, NotificationError> {
        Ok(self
            .store
            .notifications()
            .list_for_user(user_id, unread_only)
            .await?)
    }

    async fn mark_read(&self, user_id: i32, id: i32) -> Result<Notification, NotificationError> {
        Ok(self.store.notifications().mark_read(id, user_id).await?)
    }

    async fn mark_all_read(&self, user_id: i32) -> Result<u64, NotificationError> {
        Ok(self.store.notifications().mark_all_read(user_id).await?)
    }
}
