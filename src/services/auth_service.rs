//! Domain service for registration, login and token handling.

use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;
use crate::domain::{Role, ValidationError};
use crate::models::user::{AuthenticatedUser, User};
use crate::services::token_service::TokenError;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    Validation(ValidationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => Self::EmailTaken,
            StoreError::NotFound { .. } => Self::UserNotFound,
            StoreError::Database(e) => Self::Database(e.to_string()),
            StoreError::Internal(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::ExpiredToken,
            TokenError::Invalid => Self::InvalidToken,
            TokenError::Signing(e) => Self::Internal(e),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A user together with a fresh token pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account with the given roles. Used by registration and by the CLI.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] if the email already belongs to an account,
    /// [`AuthError::Validation`] if any field is malformed.
    async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        roles: &[Role],
    ) -> Result<User, AuthError>;

    /// Self-registration. New accounts hold the student role only.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for unknown, inactive or deleted
    /// accounts and for wrong passwords alike.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Exchanges a refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Resolves an access token to the active user it was issued for.
    async fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError>;

    async fn me(&self, user_id: i32) -> Result<User, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if the current password is wrong or the
    /// new one breaks the length policy.
    async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;
}
