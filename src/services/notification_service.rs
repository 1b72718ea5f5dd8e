//! Domain service for in-app notifications.
//!
//! Notifications are stored rows the client polls. Producers call
//! [`NotificationService::notify`] and friends after their own write has
//! succeeded and only log a failure, so a notification problem never fails
//! the request that triggered it.

use thiserror::Error;

use crate::db::StoreError;
use crate::domain::Role;
use crate::models::notification::{NewNotification, Notification};

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for NotificationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::Conflict(what) => Self::Internal(format!("{what} already exists")),
            StoreError::Database(e) => Self::Database(e.to_string()),
            StoreError::Internal(e) => Self::Internal(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait NotificationService: Send + Sync {
    /// Stores one notification per recipient and returns how many were written.
    async fn notify(
        &self,
        user_ids: &[i32],
        notification: NewNotification,
    ) -> Result<usize, NotificationError>;

    /// Notifies every active holder of `role`.
    async fn notify_role(
        &self,
        role: Role,
        notification: NewNotification,
    ) -> Result<usize, NotificationError>;

    /// Newest first.
    async fn list(&self, user_id: i32, unread_only: bool)
    -> Result<Vec<Notification>, NotificationError>;

    /// # Errors
    ///
    /// Returns [`NotificationError::NotFound`] if the notification does not
    /// exist or belongs to someone else.
    async fn mark_read(&self, user_id: i32, id: i32) -> Result<Notification, NotificationError>;

    /// Returns the number of notifications that changed.
    async fn mark_all_read(&self, user_id: i32) -> Result<u64, NotificationError>;
}
