//! Domain service for account administration.

use thiserror::Error;

use crate::db::StoreError;
use crate::domain::{Role, ValidationError};
use crate::models::user::{AuthenticatedUser, User, UserFilter};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    Validation(ValidationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for UserError {
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
pub trait UserService: Send + Sync {
    async fn list(&self, filter: UserFilter) -> Result<Vec<User>, UserError>;

    async fn get(&self, id: i32) -> Result<User, UserError>;

    /// Replaces the user's role set.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Validation`] for an empty set, or when an admin
    /// would drop their own admin role.
    async fn set_roles(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        roles: Vec<Role>,
    ) -> Result<User, UserError>;

    /// An admin cannot deactivate their own account.
    async fn set_active(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        active: bool,
    ) -> Result<User, UserError>;

    /// Soft delete. An admin cannot delete their own account.
    async fn delete(&self, actor: &AuthenticatedUser, id: i32) -> Result<(), UserError>;
}
