//! Route handlers for the authentication and organisation endpoints.
//!
//! Validation runs at this boundary; the authorization engine is only
//! consulted once the payload is well-formed and the caller identity has
//! been resolved by the middleware.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::auth::models::AuthContext;
use crate::auth::organisation::{
    AddMemberRequest, CreateOrganisationRequest, NewOrganisation, OrganisationResponse,
};
use crate::auth::user::{LoginRequest, RegisterRequest, UserResponse};
use crate::auth::validation::validate_request;
use crate::domain::{OrgId, UserId};

#[derive(Serialize)]
struct SuccessBody<T: Serialize> {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

fn success<T: Serialize>(message: &str, data: T) -> Json<SuccessBody<T>> {
    Json(SuccessBody { status: "success", message: message.to_string(), data: Some(data) })
}

fn success_message(message: &str) -> Json<SuccessBody<()>> {
    Json(SuccessBody { status: "success", message: message.to_string(), data: None })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthData {
    access_token: String,
    user: UserResponse,
}

#[derive(Serialize)]
struct OrganisationsData {
    organisations: Vec<OrganisationResponse>,
}

/// POST /auth/register
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&payload).map_err(ApiError::UnprocessableEntity)?;

    let (user, _organisation, token) = state.registration.register(payload).await?;

    Ok((
        StatusCode::CREATED,
        success(
            "Registration successful",
            AuthData { access_token: token, user: user.into() },
        ),
    ))
}

/// POST /auth/login
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&payload).map_err(ApiError::UnprocessableEntity)?;

    let (user, token) = state.login.login(&payload).await?;

    Ok(success("Login successful", AuthData { access_token: token, user: user.into() }))
}

/// GET /api/users/{id}
pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let target_id = UserId::from_string(id);

    let user = state
        .users
        .get_user(&target_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    state.authorization.authorize_user_access(&context.user_id, &target_id).await?;

    Ok(success("User found", UserResponse::from(user)))
}

/// GET /api/organisations
pub async fn list_organisations_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<impl IntoResponse, ApiError> {
    let organisations = state.memberships.organisations_of(&context.user_id).await?;

    Ok(success(
        "Organisations retrieved",
        OrganisationsData {
            organisations: organisations.into_iter().map(OrganisationResponse::from).collect(),
        },
    ))
}

/// GET /api/organisations/{orgId}
pub async fn get_organisation_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(org_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let org_id = OrgId::from_string(org_id);

    let organisation = state
        .organisations
        .get_organisation(&org_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Organisation not found"))?;

    state.authorization.authorize_org_access(&context.user_id, &org_id).await?;

    Ok(success("Organisation retrieved", OrganisationResponse::from(organisation)))
}

/// POST /api/organisations
pub async fn create_organisation_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(payload): Json<CreateOrganisationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&payload).map_err(ApiError::UnprocessableEntity)?;

    let new_org = NewOrganisation {
        id: OrgId::new(),
        name: payload.name,
        description: payload.description,
    };
    let organisation = state.organisations.create_with_member(new_org, &context.user_id).await?;

    Ok((
        StatusCode::CREATED,
        success("Organisation created successfully", OrganisationResponse::from(organisation)),
    ))
}

/// POST /api/organisations/{orgId}/users
pub async fn add_member_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(org_id): Path<String>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&payload).map_err(ApiError::UnprocessableEntity)?;

    let org_id = OrgId::from_string(org_id);
    let new_member = UserId::from_string(payload.user_id);

    state.authorization.authorize_member_add(&context.user_id, &org_id).await?;
    state.memberships.add_member(&new_member, &org_id).await?;

    Ok(success_message("User added to organisation successfully"))
}
