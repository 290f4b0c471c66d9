//! Router assembly and shared application state.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    add_member_handler, create_organisation_handler, get_organisation_handler, get_user_handler,
    list_organisations_handler, login_handler, register_handler,
};
use crate::auth::authorization::AuthorizationService;
use crate::auth::jwt::TokenService;
use crate::auth::login_service::LoginService;
use crate::auth::middleware::authenticate;
use crate::auth::registration::RegistrationService;
use crate::config::AuthConfig;
use crate::storage::repositories::{
    MembershipRepository, OrganisationRepository, SqlxMembershipRepository,
    SqlxOrganisationRepository, SqlxUserRepository, UserRepository,
};
use crate::storage::DbPool;

/// Shared state wired into every handler.
#[derive(Clone)]
pub struct AppState {
    pub registration: RegistrationService,
    pub login: LoginService,
    pub authorization: AuthorizationService,
    pub users: Arc<dyn UserRepository>,
    pub organisations: Arc<dyn OrganisationRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub token_service: Arc<TokenService>,
}

impl AppState {
    /// Wire SQLx repositories and services from a pool and auth config.
    pub fn new(pool: DbPool, auth: &AuthConfig) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(SqlxUserRepository::new(pool.clone()));
        let organisations: Arc<dyn OrganisationRepository> =
            Arc::new(SqlxOrganisationRepository::new(pool.clone()));
        let memberships: Arc<dyn MembershipRepository> =
            Arc::new(SqlxMembershipRepository::new(pool));

        let token_service =
            Arc::new(TokenService::new(auth.jwt_secret.as_bytes(), auth.token_ttl_secs));

        Self {
            registration: RegistrationService::new(users.clone(), token_service.clone()),
            login: LoginService::new(users.clone(), token_service.clone()),
            authorization: AuthorizationService::new(
                memberships.clone(),
                auth.require_membership_to_add,
            ),
            users,
            organisations,
            memberships,
            token_service,
        }
    }
}

/// Build the application router.
///
/// `/auth/*` is public; everything under `/api` passes through the bearer
/// authentication middleware first.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/users/{id}", get(get_user_handler))
        .route("/api/organisations", get(list_organisations_handler))
        .route("/api/organisations", post(create_organisation_handler))
        .route("/api/organisations/{orgId}", get(get_organisation_handler))
        .route("/api/organisations/{orgId}/users", post(add_member_handler))
        .layer(middleware::from_fn_with_state(state.token_service.clone(), authenticate));

    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
