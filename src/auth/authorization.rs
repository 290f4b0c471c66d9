//! Authorization engine.
//!
//! State-free decision logic evaluated per request, consulting the
//! membership directory:
//!
//! - a **user** record is visible to the user themself (self-access always
//!   wins, checked before any directory lookup) and to anyone sharing at
//!   least one organisation with them;
//! - an **organisation** record is visible to its members only;
//! - any authenticated caller may create an organisation;
//! - adding a member is permissive by default; the
//!   `require_membership_to_add` flag restricts it to existing members of
//!   the target organisation.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::auth::models::AuthError;
use crate::domain::{OrgId, UserId};
use crate::storage::repositories::MembershipRepository;

/// Per-request access decisions over users and organisations.
#[derive(Clone)]
pub struct AuthorizationService {
    memberships: Arc<dyn MembershipRepository>,
    require_membership_to_add: bool,
}

impl AuthorizationService {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        require_membership_to_add: bool,
    ) -> Self {
        Self { memberships, require_membership_to_add }
    }

    /// Decide whether `caller` may read the user record of `target`.
    #[instrument(skip(self), fields(caller = %caller, target = %target))]
    pub async fn authorize_user_access(
        &self,
        caller: &UserId,
        target: &UserId,
    ) -> Result<(), AuthError> {
        // Self-access short-circuits before any membership lookup; a caller
        // is never blocked from their own record.
        if caller == target {
            return Ok(());
        }

        if self.memberships.share_organisation(caller, target).await? {
            return Ok(());
        }

        debug!(caller = %caller, target = %target, "user access denied");
        Err(AuthError::Forbidden)
    }

    /// Decide whether `caller` may read the organisation record `org`.
    #[instrument(skip(self), fields(caller = %caller, org = %org))]
    pub async fn authorize_org_access(
        &self,
        caller: &UserId,
        org: &OrgId,
    ) -> Result<(), AuthError> {
        if self.memberships.is_member(caller, org).await? {
            return Ok(());
        }

        debug!(caller = %caller, org = %org, "organisation access denied");
        Err(AuthError::Forbidden)
    }

    /// Decide whether `caller` may add a user to `org`.
    #[instrument(skip(self), fields(caller = %caller, org = %org))]
    pub async fn authorize_member_add(
        &self,
        caller: &UserId,
        org: &OrgId,
    ) -> Result<(), AuthError> {
        if !self.require_membership_to_add {
            return Ok(());
        }

        self.authorize_org_access(caller, org).await
    }
}
