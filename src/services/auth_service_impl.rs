//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::db::repositories::user::{hash_password, verify_password};
use crate::domain::{Email, Password, Role, ValidationError, bounded_text};
use crate::models::user::{AuthenticatedUser, User};
use crate::services::auth_service::{AuthError, AuthService, AuthSession};
use crate::services::token_service::{TokenKind, TokenService};

/// Longest accepted display name, in characters.
pub const MAX_NAME_LEN: usize = 100;

pub struct SeaOrmAuthService {
    store: Store,
    tokens: Arc<TokenService>,
    security: SecurityConfig,
    password_min_length: usize,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(
        store: Store,
        tokens: Arc<TokenService>,
        security: SecurityConfig,
        password_min_length: usize,
    ) -> Self {
        Self {
            store,
            tokens,
            security,
            password_min_length,
        }
    }

    async fn hash(&self, password: Password) -> Result<String, AuthError> {
        let security = self.security.clone();
        tokio::task::spawn_blocking(move || hash_password(password.expose(), &security))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))?
            .map_err(AuthError::from)
    }

    async fn verify(&self, hash: String, password: &str) -> Result<bool, AuthError> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || verify_password(&hash, &password))
            .await
            .map_err(|e| AuthError::Internal(format!("Verification task failed: {e}")))?
            .map_err(AuthError::from)
    }

    fn session(&self, user: User) -> Result<AuthSession, AuthError> {
        let pair = self.tokens.issue_pair(&user)?;
        Ok(AuthSession {
            user,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        })
    }

    /// Loads the user a verified token points at. Missing or inactive users
    /// invalidate the token.
    async fn active_user(&self, user_id: i32) -> Result<User, AuthError> {
        match self.store.users().get_by_id(user_id).await? {
            Some(user) if user.active => Ok(user),
            _ => Err(AuthError::InvalidToken),
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        roles: &[Role],
    ) -> Result<User, AuthError> {
        let name = bounded_text(name, "name", 1, MAX_NAME_LEN)?;
        let email = Email::parse(email)?;
        let password = Password::parse(password, self.password_min_length)?;

        if roles.is_empty() {
            return Err(ValidationError::new("roles", "At least one role is required").into());
        }

        let users = self.store.users();
        if users.get_by_email(email.as_str()).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let hash = self.hash(password).await?;
        let user = users.create(&name, email.as_str(), &hash, roles).await?;

        info!(user_id = user.id, roles = ?user.roles, "Account created");
        Ok(user)
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let user = self
            .create_account(name, email, password, &[Role::DEFAULT])
            .await?;
        self.session(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let Some(credentials) = self
            .store
            .users()
            .get_credentials_by_email(email.as_str())
            .await?
        else {
            warn!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verify(credentials.password_hash, password).await? {
            warn!(user_id = credentials.user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !credentials.user.active {
            warn!(user_id = credentials.user.id, "Login rejected: account inactive");
            return Err(AuthError::InvalidCredentials);
        }

        self.session(credentials.user)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.tokens.verify(refresh_token, TokenKind::Refresh)?;
        let user = self.active_user(claims.user_id()?).await?;

        Ok(self.tokens.issue(&user, TokenKind::Access)?)
    }

    async fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.tokens.verify(access_token, TokenKind::Access)?;
        let user = self.active_user(claims.user_id()?).await?;

        Ok(user.into())
    }

    async fn me(&self, user_id: i32) -> Result<User, AuthError> {
        self.store
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let new_password =
            Password::parse_field(new_password, self.password_min_length, "newPassword")?;

        if current_password == new_password.expose() {
            return Err(ValidationError::new(
                "newPassword",
                "New password must be different from current password",
            )
            .into());
        }

        let users = self.store.users();
        let hash = users
            .get_password_hash(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.verify(hash, current_password).await? {
            return Err(
                ValidationError::new("currentPassword", "Current password is incorrect").into(),
            );
        }

        let new_hash = self.hash(new_password).await?;
        users.update_password_hash(user_id, &new_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }
}
