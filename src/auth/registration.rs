//! Registration flow.
//!
//! Onboards a new user: duplicate-email check, password hashing, and the
//! transactional creation of the user together with their default
//! organisation (`"<firstName>'s Organisation"`) and the membership
//! linking the two. A uniqueness violation surfaced at commit time is the
//! same `Conflict` outcome as the pre-insert check, so two concurrent
//! registrations with one email race safely.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::hashing;
use crate::auth::jwt::TokenService;
use crate::auth::organisation::{NewOrganisation, Organisation};
use crate::auth::user::{NewUser, RegisterRequest, User};
use crate::domain::{OrgId, UserId};
use crate::errors::{Error, Result};
use crate::storage::repositories::UserRepository;

/// Service orchestrating user onboarding.
#[derive(Clone)]
pub struct RegistrationService {
    user_repository: Arc<dyn UserRepository>,
    token_service: Arc<TokenService>,
}

impl RegistrationService {
    pub fn new(user_repository: Arc<dyn UserRepository>, token_service: Arc<TokenService>) -> Self {
        Self { user_repository, token_service }
    }

    /// Register a new user and hand back their first bearer token.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` ("Registration unsuccessful") when the email is
    /// already registered, whether detected by the pre-check or by the
    /// unique constraint at commit time.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> Result<(User, Organisation, String)> {
        let email = User::normalize_email(&request.email);

        if self.user_repository.get_user_by_email(&email).await?.is_some() {
            return Err(Error::conflict("Registration unsuccessful", "user"));
        }

        let password_hash = hashing::hash_password(&request.password)?;

        let new_user = NewUser {
            id: UserId::new(),
            email,
            password_hash,
            first_name: request.first_name.clone(),
            last_name: request.last_name,
            phone: request.phone,
        };
        let default_org = NewOrganisation {
            id: OrgId::new(),
            name: User::default_organisation_name(&request.first_name),
            description: Some(String::new()),
        };

        let (user, organisation) =
            self.user_repository.create_user_with_default_org(new_user, default_org).await?;

        let token = self.token_service.issue(&user.id)?;

        info!(user_id = %user.id, org_id = %organisation.id, "user registered");
        Ok((user, organisation, token))
    }
}
