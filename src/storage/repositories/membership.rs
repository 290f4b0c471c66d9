//! Membership directory.
//!
//! Answers the queries the authorization engine is built on: direct
//! membership, the set of organisations a user belongs to, and whether two
//! users share at least one organisation.

use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;

use crate::auth::organisation::Membership;
use crate::domain::{MembershipId, OrgId, UserId};
use crate::errors::{Error, Result};
use crate::storage::repositories::organisation::OrganisationRow;
use crate::storage::DbPool;

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Create a membership row linking an existing user to an existing
    /// organisation.
    ///
    /// Fails with `NotFound` when either side is absent and `Conflict`
    /// when the pair already exists.
    async fn add_member(&self, user_id: &UserId, org_id: &OrgId) -> Result<Membership>;

    /// Membership existence check
    async fn is_member(&self, user_id: &UserId, org_id: &OrgId) -> Result<bool>;

    /// All organisations a user belongs to
    async fn organisations_of(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<crate::auth::organisation::Organisation>>;

    /// Whether two users belong to at least one common organisation
    async fn share_organisation(&self, a: &UserId, b: &UserId) -> Result<bool>;
}

#[derive(Debug, Clone)]
pub struct SqlxMembershipRepository {
    pool: DbPool,
}

impl SqlxMembershipRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn row_exists(&self, table: &str, id: &str) -> Result<bool> {
        // `table` comes from the two call sites below, never from input.
        let query = format!("SELECT COUNT(*) FROM {} WHERE id = $1", table);
        let count: i64 = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::database(e, format!("Failed to check {} existence", table)))?;
        Ok(count > 0)
    }
}

#[async_trait]
impl MembershipRepository for SqlxMembershipRepository {
    #[instrument(skip(self), fields(user_id = %user_id, org_id = %org_id), name = "db_add_member")]
    async fn add_member(&self, user_id: &UserId, org_id: &OrgId) -> Result<Membership> {
        if !self.row_exists("organisations", org_id.as_str()).await? {
            return Err(Error::not_found("organisation", org_id.as_str()));
        }
        if !self.row_exists("users", user_id.as_str()).await? {
            return Err(Error::not_found("user", user_id.as_str()));
        }

        let id = MembershipId::new();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO memberships (id, user_id, org_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.as_str())
        .bind(user_id.as_str())
        .bind(org_id.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().map(|db| db.is_unique_violation()).unwrap_or(false) {
                Error::conflict("User is already a member of this organisation", "membership")
            } else {
                Error::database(e, "Failed to create membership")
            }
        })?;

        Ok(Membership {
            id,
            user_id: user_id.clone(),
            org_id: org_id.clone(),
            created_at: now,
        })
    }

    #[instrument(skip(self), fields(user_id = %user_id, org_id = %org_id), name = "db_is_member")]
    async fn is_member(&self, user_id: &UserId, org_id: &OrgId) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM memberships WHERE user_id = $1 AND org_id = $2",
        )
        .bind(user_id.as_str())
        .bind(org_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::database(e, "Failed to check membership"))?;

        Ok(count > 0)
    }

    #[instrument(skip(self), fields(user_id = %user_id), name = "db_organisations_of")]
    async fn organisations_of(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<crate::auth::organisation::Organisation>> {
        let rows = sqlx::query_as::<_, OrganisationRow>(
            r#"
            SELECT o.id, o.name, o.description, o.created_at, o.updated_at
            FROM organisations o
            JOIN memberships m ON m.org_id = o.id
            WHERE m.user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::database(e, "Failed to list user organisations"))?;

        Ok(rows.into_iter().map(OrganisationRow::into_organisation).collect())
    }

    #[instrument(skip(self), fields(a = %a, b = %b), name = "db_share_organisation")]
    async fn share_organisation(&self, a: &UserId, b: &UserId) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM memberships caller
            JOIN memberships target ON caller.org_id = target.org_id
            WHERE caller.user_id = $1 AND target.user_id = $2
            "#,
        )
        .bind(a.as_str())
        .bind(b.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::database(e, "Failed to check shared organisation"))?;

        Ok(count > 0)
    }
}
