//! Organisation and membership domain models.
//!
//! Organisations are the visibility boundary of the system: a user can see
//! another user's record only when they share at least one organisation.
//! Membership is a bare (user, organisation) pair with a uniqueness
//! invariant and no further attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{MembershipId, OrgId, UserId};

/// Stored representation of an organisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    pub id: OrgId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New organisation creation payload.
#[derive(Debug, Clone)]
pub struct NewOrganisation {
    pub id: OrgId,
    pub name: String,
    pub description: Option<String>,
}

/// A user's membership in an organisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: MembershipId,
    pub user_id: UserId,
    pub org_id: OrgId,
    pub created_at: DateTime<Utc>,
}

/// Request to create a new organisation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganisationRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
}

/// Request to add a user to an organisation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
}

/// Public organisation payload returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationResponse {
    pub org_id: OrgId,
    pub name: String,
    pub description: Option<String>,
}

impl From<Organisation> for OrganisationResponse {
    fn from(org: Organisation) -> Self {
        Self { org_id: org.id, name: org.name, description: org.description }
    }
}
