//! Organisation repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::instrument;

use crate::auth::organisation::{NewOrganisation, Organisation};
use crate::domain::{MembershipId, OrgId, UserId};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

#[derive(Debug, Clone, FromRow)]
pub(crate) struct OrganisationRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrganisationRow {
    pub(crate) fn into_organisation(self) -> Organisation {
        Organisation {
            id: OrgId::from_string(self.id),
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[async_trait]
pub trait OrganisationRepository: Send + Sync {
    /// Create an organisation and enrol the creator as its first member,
    /// as a single atomic unit.
    async fn create_with_member(
        &self,
        org: NewOrganisation,
        creator: &UserId,
    ) -> Result<Organisation>;

    /// Get an organisation by ID
    async fn get_organisation(&self, id: &OrgId) -> Result<Option<Organisation>>;
}

#[derive(Debug, Clone)]
pub struct SqlxOrganisationRepository {
    pool: DbPool,
}

impl SqlxOrganisationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganisationRepository for SqlxOrganisationRepository {
    #[instrument(
        skip(self, org),
        fields(org_id = %org.id, org_name = %org.name, creator = %creator),
        name = "db_create_organisation"
    )]
    async fn create_with_member(
        &self,
        org: NewOrganisation,
        creator: &UserId,
    ) -> Result<Organisation> {
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::database(e, "Failed to begin organisation transaction"))?;

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
        .map_err(|e| Error::database(e, "Failed to create organisation"))?;

        sqlx::query(
            r#"
            INSERT INTO memberships (id, user_id, org_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(MembershipId::new().as_str())
        .bind(creator.as_str())
        .bind(org.id.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::database(e, "Failed to enrol organisation creator"))?;

        tx.commit()
            .await
            .map_err(|e| Error::database(e, "Failed to commit organisation transaction"))?;

        Ok(Organisation {
            id: org.id,
            name: org.name,
            description: org.description,
            created_at: now,
            updated_at: now,
        })
    }

    #[instrument(skip(self), fields(org_id = %id), name = "db_get_organisation")]
    async fn get_organisation(&self, id: &OrgId) -> Result<Option<Organisation>> {
        let row = sqlx::query_as::<_, OrganisationRow>(
            "SELECT id, name, description, created_at, updated_at FROM organisations WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::database(e, "Failed to fetch organisation"))?;

        Ok(row.map(OrganisationRow::into_organisation))
    }
}
