//! JWT issuance and verification.
//!
//! Access and refresh tokens are HS256 JWTs signed with separate secrets.
//! Every token carries a `kind` claim, so a token of one kind is never
//! accepted where the other is expected, even if the secrets were shared.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::AuthConfig;
use crate::domain::Role;
use crate::models::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string.
    pub sub: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<i32, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Invalid)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct TokenService {
    access_secret: String,
    refresh_secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    #[must_use]
    pub const fn new(
        access_secret: String,
        refresh_secret: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_secret,
            refresh_secret,
            access_ttl,
            refresh_ttl,
        }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            config.jwt_refresh_secret.clone(),
            Duration::minutes(config.access_token_minutes),
            Duration::days(config.refresh_token_days),
        )
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.access_secret.as_bytes(),
            TokenKind::Refresh => self.refresh_secret.as_bytes(),
        }
    }

    const fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    pub fn issue(&self, user: &User, kind: TokenKind) -> Result<String, TokenError> {
        self.issue_at(user, kind, Utc::now())
    }

    /// Issues a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        user: &User,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            roles: user.roles.clone(),
            kind,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl(kind)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret(kind)),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(user, TokenKind::Access)?,
            refresh_token: self.issue(user, TokenKind::Refresh)?,
        })
    }

    /// Checks signature, expiry and kind.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret(expected)),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;

        if data.claims.kind != expected {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(
            "access-secret-for-tests-0123456789".to_string(),
            "refresh-secret-for-tests-987654321".to_string(),
            Duration::minutes(15),
            Duration::days(7),
        )
    }

    fn user() -> User {
        User {
            id: 42,
            name: "Ada".to_string(),
            email: "ada@campus.edu".to_string(),
            active: true,
            roles: vec![Role::Student],
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let tokens = service();
        let token = tokens.issue(&user(), TokenKind::Access).unwrap();

        let claims = tokens.verify(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.email, "ada@campus.edu");
        assert_eq!(claims.roles, vec![Role::Student]);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let tokens = service();
        let refresh = tokens.issue(&user(), TokenKind::Refresh).unwrap();

        assert_eq!(
            tokens.verify(&refresh, TokenKind::Access),
            Err(TokenError::Invalid)
        );
        assert!(tokens.verify(&refresh, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn test_kind_claim_checked_with_shared_secret() {
        let tokens = TokenService::new(
            "same".to_string(),
            "same".to_string(),
            Duration::minutes(15),
            Duration::days(7),
        );
        let refresh = tokens.issue(&user(), TokenKind::Refresh).unwrap();
        assert_eq!(
            tokens.verify(&refresh, TokenKind::Access),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_expired_token() {
        let tokens = service();
        let issued = Utc::now() - Duration::hours(1);
        let token = tokens.issue_at(&user(), TokenKind::Access, issued).unwrap();

        assert_eq!(
            tokens.verify(&token, TokenKind::Access),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_garbage_and_tampered_tokens() {
        let tokens = service();
        assert_eq!(
            tokens.verify("not.a.jwt", TokenKind::Access),
            Err(TokenError::Invalid)
        );

        let other = TokenService::new(
            "some-other-secret".to_string(),
            "another-one".to_string(),
            Duration::minutes(15),
            Duration::days(7),
        );
        let foreign = other.issue(&user(), TokenKind::Access).unwrap();
        assert_eq!(
            tokens.verify(&foreign, TokenKind::Access),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", service());
        assert!(!debug.contains("access-secret-for-tests"));
        assert!(debug.contains("<redacted>"));
    }
}
