use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

use crate::db::{StoreError, StoreResult};
use crate::entities::{notifications, prelude::*};
use crate::models::notification::{NewNotification, Notification};

pub struct NotificationRepository {
    conn: DatabaseConnection,
}

impl From<notifications::Model> for Notification {
    fn from(model: notifications::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            kind: model.kind,
            title: model.title,
            message: model.message,
            read: model.read,
            created_at: model.created_at,
        }
    }
}

impl NotificationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// One row per recipient. Returns the number of rows written.
    pub async fn create_many(
        &self,
        user_ids: &[i32],
        notification: &NewNotification,
    ) -> StoreResult<usize> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().to_rfc3339();
        let rows: Vec<notifications::ActiveModel> = user_ids
            .iter()
            .map(|&user_id| notifications::ActiveModel {
                user_id: Set(user_id),
                kind: Set(notification.kind.as_str().to_string()),
                title: Set(notification.title.clone()),
                message: Set(notification.message.clone()),
                read: Set(false),
                created_at: Set(now.clone()),
                ..Default::default()
            })
            .collect();

        Notifications::insert_many(rows).exec(&self.conn).await?;
        Ok(user_ids.len())
    }

    /// Newest first.
    pub async fn list_for_user(
        &self,
        user_id: i32,
        unread_only: bool,
    ) -> StoreResult<Vec<Notification>> {
        let mut query = Notifications::find().filter(notifications::Column::UserId.eq(user_id));
        if unread_only {
            query = query.filter(notifications::Column::Read.eq(false));
        }

        let models = query
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(models.into_iter().map(Notification::from).collect())
    }

    /// Marks one notification read. Other users' notifications are reported as not found.
    pub async fn mark_read(&self, id: i32, user_id: i32) -> StoreResult<Notification> {
        let model = Notifications::find_by_id(id)
            .filter(notifications::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?
            .ok_or(StoreError::not_found("Notification", id))?;

        let mut active: notifications::ActiveModel = model.into();
        active.read = Set(true);
        let model = active.update(&self.conn).await?;

        Ok(model.into())
    }

    pub async fn mark_all_read(&self, user_id: i32) -> StoreResult<u64> {
        let result = Notifications::update_many()
            .col_expr(notifications::Column::Read, Expr::value(true))
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::Read.eq(false))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }
}
