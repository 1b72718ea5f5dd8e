use serde::Serialize;

use crate::domain::{Role, has_any_role};

/// A user account as exposed to the rest of the system (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub roles: Vec<Role>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    #[must_use]
    pub fn has_any_role(&self, required: &[Role]) -> bool {
        has_any_role(&self.roles, required)
    }
}

/// Filter for the admin user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub include_inactive: bool,
}

/// The caller of a protected route, as resolved from a verified access token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub roles: Vec<Role>,
}

impl AuthenticatedUser {
    #[must_use]
    pub fn has_any_role(&self, required: &[Role]) -> bool {
        has_any_role(&self.roles, required)
    }
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            roles: user.roles,
        }
    }
}
