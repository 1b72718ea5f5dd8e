use anyhow::Context;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

use crate::config::SecurityConfig;
use crate::db::{StoreError, StoreResult};
use crate::domain::Role;
use crate::entities::{prelude::*, roles, user_roles, users};
use crate::models::user::{User, UserFilter};

/// A user together with the stored password hash, used only by login.
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: users::Model, mut roles: Vec<Role>) -> User {
        roles.sort();
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            active: model.active,
            roles,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    /// Role sets keyed by user id.
    async fn roles_for<C: ConnectionTrait>(
        db: &C,
        user_ids: &[i32],
    ) -> StoreResult<HashMap<i32, Vec<Role>>> {
        let rows = UserRoles::find()
            .filter(user_roles::Column::UserId.is_in(user_ids.iter().copied()))
            .find_also_related(Roles)
            .all(db)
            .await?;

        let mut map: HashMap<i32, Vec<Role>> = HashMap::new();
        for (link, role) in rows {
            let Some(role) = role else { continue };
            match role.name.parse::<Role>() {
                Ok(parsed) => map.entry(link.user_id).or_default().push(parsed),
                Err(e) => warn!("Ignoring role row for user {}: {}", link.user_id, e),
            }
        }

        Ok(map)
    }

    async fn attach_roles<C: ConnectionTrait>(
        db: &C,
        models: Vec<users::Model>,
    ) -> StoreResult<Vec<User>> {
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut roles = Self::roles_for(db, &ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let user_roles = roles.remove(&m.id).unwrap_or_default();
                Self::map_model(m, user_roles)
            })
            .collect())
    }

    async fn with_roles<C: ConnectionTrait>(db: &C, model: users::Model) -> StoreResult<User> {
        let mut users = Self::attach_roles(db, vec![model]).await?;
        users
            .pop()
            .ok_or_else(|| StoreError::Internal(anyhow::anyhow!("User vanished while loading roles")))
    }

    /// Replaces every role link of `user_id` with `roles`.
    async fn write_roles<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        roles: &[Role],
    ) -> StoreResult<()> {
        let wanted: BTreeSet<&'static str> = roles.iter().map(Role::as_str).collect();

        let role_rows = Roles::find()
            .filter(roles::Column::Name.is_in(wanted.iter().copied()))
            .all(db)
            .await?;

        if role_rows.len() != wanted.len() {
            return Err(StoreError::Internal(anyhow::anyhow!(
                "Role table is missing seeded roles (wanted {wanted:?})"
            )));
        }

        UserRoles::delete_many()
            .filter(user_roles::Column::UserId.eq(user_id))
            .exec(db)
            .await?;

        let links: Vec<user_roles::ActiveModel> = role_rows
            .into_iter()
            .map(|r| user_roles::ActiveModel {
                user_id: Set(user_id),
                role_id: Set(r.id),
            })
            .collect();

        if !links.is_empty() {
            UserRoles::insert_many(links).exec(db).await?;
        }

        Ok(())
    }

    fn live_users() -> sea_orm::Select<Users> {
        Users::find().filter(users::Column::DeletedAt.is_null())
    }

    /// Inserts a user and its role links in one transaction.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        roles: &[Role],
    ) -> StoreResult<User> {
        let txn = self.conn.begin().await?;
        let now = chrono::Utc::now().to_rfc3339();

        let model = users::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| StoreError::from_write(e, "email"))?;

        Self::write_roles(&txn, model.id, roles).await?;
        let user = Self::with_roles(&txn, model).await?;

        txn.commit().await?;
        Ok(user)
    }

    pub async fn get_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        let model = Self::live_users()
            .filter(users::Column::Id.eq(id))
            .one(&self.conn)
            .await?;

        match model {
            Some(m) => Ok(Some(Self::with_roles(&self.conn, m).await?)),
            None => Ok(None),
        }
    }

    pub async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.get_credentials_by_email(email).await?.map(|c| c.user))
    }

    pub async fn get_credentials_by_email(
        &self,
        email: &str,
    ) -> StoreResult<Option<UserCredentials>> {
        let model = Self::live_users()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await?;

        let Some(model) = model else {
            return Ok(None);
        };

        let password_hash = model.password_hash.clone();
        let user = Self::with_roles(&self.conn, model).await?;
        Ok(Some(UserCredentials {
            user,
            password_hash,
        }))
    }

    pub async fn get_password_hash(&self, id: i32) -> StoreResult<Option<String>> {
        let model = Self::live_users()
            .filter(users::Column::Id.eq(id))
            .one(&self.conn)
            .await?;

        Ok(model.map(|m| m.password_hash))
    }

    pub async fn list(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let mut query = Self::live_users();

        if !filter.include_inactive {
            query = query.filter(users::Column::Active.eq(true));
        }

        if let Some(role) = filter.role {
            query = query
                .join(JoinType::InnerJoin, users::Relation::UserRoles.def())
                .join(JoinType::InnerJoin, user_roles::Relation::Roles.def())
                .filter(roles::Column::Name.eq(role.as_str()));
        }

        let models = query
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;

        Self::attach_roles(&self.conn, models).await
    }

    /// Ids of active users holding `role`.
    pub async fn ids_with_role(&self, role: Role) -> StoreResult<Vec<i32>> {
        let ids = Self::live_users()
            .filter(users::Column::Active.eq(true))
            .join(JoinType::InnerJoin, users::Relation::UserRoles.def())
            .join(JoinType::InnerJoin, user_roles::Relation::Roles.def())
            .filter(roles::Column::Name.eq(role.as_str()))
            .select_only()
            .column(users::Column::Id)
            .into_tuple::<i32>()
            .all(&self.conn)
            .await?;

        Ok(ids)
    }

    async fn find_live(&self, id: i32) -> StoreResult<users::Model> {
        Self::live_users()
            .filter(users::Column::Id.eq(id))
            .one(&self.conn)
            .await?
            .ok_or(StoreError::not_found("User", id))
    }

    pub async fn set_roles(&self, id: i32, roles: &[Role]) -> StoreResult<User> {
        let model = self.find_live(id).await?;

        let txn = self.conn.begin().await?;
        Self::write_roles(&txn, id, roles).await?;

        let mut active: users::ActiveModel = model.into();
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        let model = active.update(&txn).await?;

        let user = Self::with_roles(&txn, model).await?;
        txn.commit().await?;
        Ok(user)
    }

    pub async fn set_active(&self, id: i32, is_active: bool) -> StoreResult<User> {
        let model = self.find_live(id).await?;

        let mut active: users::ActiveModel = model.into();
        active.active = Set(is_active);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        let model = active.update(&self.conn).await?;

        Self::with_roles(&self.conn, model).await
    }

    /// Marks the user deleted and inactive. The row and its history stay.
    pub async fn soft_delete(&self, id: i32) -> StoreResult<()> {
        let model = self.find_live(id).await?;
        let now = chrono::Utc::now().to_rfc3339();

        let mut active: users::ActiveModel = model.into();
        active.active = Set(false);
        active.deleted_at = Set(Some(now.clone()));
        active.updated_at = Set(now);
        active.update(&self.conn).await?;

        Ok(())
    }

    pub async fn update_password_hash(&self, id: i32, password_hash: &str) -> StoreResult<()> {
        let model = self.find_live(id).await?;

        let mut active: users::ActiveModel = model.into();
        active.password_hash = Set(password_hash.to_string());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(())
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
///
/// CPU-heavy: call from `spawn_blocking`.
pub fn hash_password(password: &str, config: &SecurityConfig) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Checks `password` against a PHC-format hash. Parameters come from the hash itself.
pub fn verify_password(password_hash: &str, password: &str) -> anyhow::Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))
        .context("Stored password hash is unreadable")?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
