//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::{Role, ValidationError};
use crate::models::user::{AuthenticatedUser, User, UserFilter};
use crate::services::user_service::{UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn list(&self, filter: UserFilter) -> Result<Vec<User>, UserError> {
        Ok(self.store.users().list(&filter).await?)
    }

    async fn get(&self, id: i32) -> Result<User, UserError> {
        self.store
            .users()
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)
    }

    async fn set_roles(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        mut roles: Vec<Role>,
    ) -> Result<User, UserError> {
        roles.sort();
        roles.dedup();

        if roles.is_empty() {
            return Err(ValidationError::new("roles", "At least one role is required").into());
        }

        if actor.id == id && !roles.contains(&Role::Admin) {
            return Err(ValidationError::new(
                "roles",
                "You cannot remove your own admin role",
            )
            .into());
        }

        let user = self.store.users().set_roles(id, &roles).await?;

        info!(user_id = id, roles = ?user.roles, actor_id = actor.id, "User roles replaced");
        Ok(user)
    }

    async fn set_active(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        active: bool,
    ) -> Result<User, UserError> {
        if actor.id == id && !active {
            return Err(
                ValidationError::new("active", "You cannot deactivate your own account").into(),
            );
        }

        let user = self.store.users().set_active(id, active).await?;

        info!(user_id = id, active, actor_id = actor.id, "User activation changed");
        Ok(user)
    }

    async fn delete(&self, actor: &AuthenticatedUser, id: i32) -> Result<(), UserError> {
        if actor.id == id {
            return Err(ValidationError::new("id", "You cannot delete your own account").into());
        }

        self.store.users().soft_delete(id).await?;

        info!(user_id = id, actor_id = actor.id, "User deleted");
        Ok(())
    }
}
