//! Access-decision tests over the real membership directory.

mod common;

use orggate::auth::models::AuthError;
use orggate::auth::organisation::NewOrganisation;
use orggate::domain::OrgId;

#[tokio::test]
async fn self_access_is_always_allowed() {
    let state = common::test_state().await;
    let (user, _, _) =
        state.registration.register(common::register_request("Solo", "solo@example.com")).await.unwrap();

    assert!(state.authorization.authorize_user_access(&user.id, &user.id).await.is_ok());
}

#[tokio::test]
async fn users_without_a_shared_organisation_cannot_see_each_other() {
    let state = common::test_state().await;
    let (a, _, _) =
        state.registration.register(common::register_request("Ann", "ann@example.com")).await.unwrap();
    let (b, _, _) =
        state.registration.register(common::register_request("Ben", "ben@example.com")).await.unwrap();

    assert!(matches!(
        state.authorization.authorize_user_access(&a.id, &b.id).await,
        Err(AuthError::Forbidden)
    ));
    assert!(matches!(
        state.authorization.authorize_user_access(&b.id, &a.id).await,
        Err(AuthError::Forbidden)
    ));
}

#[tokio::test]
async fn a_shared_organisation_opens_cross_user_visibility() {
    let state = common::test_state().await;
    let (a, a_org, _) =
        state.registration.register(common::register_request("Ann", "ann@example.com")).await.unwrap();
    let (b, _, _) =
        state.registration.register(common::register_request("Ben", "ben@example.com")).await.unwrap();

    state.memberships.add_member(&b.id, &a_org.id).await.unwrap();

    assert!(state.authorization.authorize_user_access(&a.id, &b.id).await.is_ok());
    assert!(state.authorization.authorize_user_access(&b.id, &a.id).await.is_ok());
}

#[tokio::test]
async fn organisation_records_are_member_only() {
    // spec scenario: A cannot read B's default organisation, B can.
    let state = common::test_state().await;
    let (a, _, _) =
        state.registration.register(common::register_request("Ann", "ann@example.com")).await.unwrap();
    let (b, b_org, _) =
        state.registration.register(common::register_request("Ben", "ben@example.com")).await.unwrap();

    assert!(matches!(
        state.authorization.authorize_org_access(&a.id, &b_org.id).await,
        Err(AuthError::Forbidden)
    ));
    assert!(state.authorization.authorize_org_access(&b.id, &b_org.id).await.is_ok());
}

#[tokio::test]
async fn creator_becomes_first_member_of_a_new_organisation() {
    let state = common::test_state().await;
    let (user, _, _) =
        state.registration.register(common::register_request("Ann", "ann@example.com")).await.unwrap();

    let org = state
        .organisations
        .create_with_member(
            NewOrganisation { id: OrgId::new(), name: "Acme".into(), description: None },
            &user.id,
        )
        .await
        .unwrap();

    assert!(state.memberships.is_member(&user.id, &org.id).await.unwrap());

    let orgs = state.memberships.organisations_of(&user.id).await.unwrap();
    assert_eq!(orgs.len(), 2); // default org + Acme
}

#[tokio::test]
async fn duplicate_membership_is_a_conflict() {
    let state = common::test_state().await;
    let (a, a_org, _) =
        state.registration.register(common::register_request("Ann", "ann@example.com")).await.unwrap();
    let (b, _, _) =
        state.registration.register(common::register_request("Ben", "ben@example.com")).await.unwrap();

    state.memberships.add_member(&b.id, &a_org.id).await.unwrap();
    let err = state.memberships.add_member(&b.id, &a_org.id).await.unwrap_err();
    assert_eq!(err.status_code(), 409);

    // Re-registering the pair must not have duplicated anything.
    let orgs = state.memberships.organisations_of(&b.id).await.unwrap();
    assert_eq!(orgs.len(), 2);

    // The auto-created membership is also protected.
    let err = state.memberships.add_member(&a.id, &a_org.id).await.unwrap_err();
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn membership_requires_both_sides_to_exist() {
    let state = common::test_state().await;
    let (a, a_org, _) =
        state.registration.register(common::register_request("Ann", "ann@example.com")).await.unwrap();

    let missing_org = state
        .memberships
        .add_member(&a.id, &OrgId::from_string("missing-org".into()))
        .await
        .unwrap_err();
    assert_eq!(missing_org.status_code(), 404);

    let missing_user = state
        .memberships
        .add_member(&orggate::domain::UserId::from_string("missing-user".into()), &a_org.id)
        .await
        .unwrap_err();
    assert_eq!(missing_user.status_code(), 404);
}
