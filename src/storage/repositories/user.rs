//! User repository.
//!
//! Provides lookups over user accounts plus the transactional
//! `create_user_with_default_org` command used by registration: user,
//! default organisation, and membership are written inside one
//! transaction, so a half-created user can never be observed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::instrument;

use crate::auth::organisation::{NewOrganisation, Organisation};
use crate::auth::user::{NewUser, User};
use crate::domain::{MembershipId, UserId};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

#[derive(Debug, Clone, FromRow)]
struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::from_string(self.id),
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user together with their default organisation and the
    /// membership linking the two, as a single atomic unit.
    ///
    /// A duplicate email surfaced by the unique constraint maps to the
    /// same `Conflict` outcome as the caller's pre-insert check.
    async fn create_user_with_default_org(
        &self,
        user: NewUser,
        org: NewOrganisation,
    ) -> Result<(User, Organisation)>;

    /// Get a user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Get a user by email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Get a user with their password hash for authentication
    async fn get_user_with_password(&self, email: &str) -> Result<Option<(User, String)>>;
}

#[derive(Debug, Clone)]
pub struct SqlxUserRepository {
    pool: DbPool,
}

impl SqlxUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_user_insert_error(err: sqlx::Error) -> Error {
    if err.as_database_error().map(|db| db.is_unique_violation()).unwrap_or(false) {
        Error::conflict("Registration unsuccessful", "user")
    } else {
        Error::database(err, "Failed to create user")
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    #[instrument(
        skip(self, user, org),
        fields(user_email = %user.email, user_id = %user.id),
        name = "db_create_user_with_default_org"
    )]
    async fn create_user_with_default_org(
        &self,
        user: NewUser,
        org: NewOrganisation,
    ) -> Result<(User, Organisation)> {
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::database(e, "Failed to begin registration transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_user_insert_error)?;

        sqlx::query(
            r#"
            INSERT INTO organisations (id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(org.id.as_str())
        .bind(&org.name)
        .bind(&org.description)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::database(e, "Failed to create default organisation"))?;

        sqlx::query(
            r#"
            INSERT INTO memberships (id, user_id, org_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(MembershipId::new().as_str())
        .bind(user.id.as_str())
        .bind(org.id.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::database(e, "Failed to create default membership"))?;

        tx.commit().await.map_err(map_user_insert_error)?;

        let created_user = User {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            created_at: now,
            updated_at: now,
        };
        let created_org = Organisation {
            id: org.id,
            name: org.name,
            description: org.description,
            created_at: now,
            updated_at: now,
        };

        Ok((created_user, created_org))
    }

    #[instrument(skip(self), fields(user_id = %id), name = "db_get_user")]
    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, first_name, last_name, phone, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::database(e, "Failed to fetch user"))?;

        Ok(row.map(UserRow::into_user))
    }

    #[instrument(skip(self, email), name = "db_get_user_by_email")]
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, first_name, last_name, phone, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::database(e, "Failed to fetch user by email"))?;

        Ok(row.map(UserRow::into_user))
    }

    #[instrument(skip(self, email), name = "db_get_user_with_password")]
    async fn get_user_with_password(&self, email: &str) -> Result<Option<(User, String)>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, first_name, last_name, phone, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::database(e, "Failed to fetch user credentials"))?;

        Ok(row.map(|r| {
            let hash = r.password_hash.clone();
            (r.into_user(), hash)
        }))
    }
}
