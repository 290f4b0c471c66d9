//! Registration and login flow tests over a real SQLx-backed state.

mod common;

use orggate::auth::organisation::NewOrganisation;
use orggate::auth::user::{LoginRequest, NewUser};
use orggate::domain::{OrgId, UserId};
use orggate::errors::Error;

#[tokio::test]
async fn registration_creates_exactly_one_default_organisation() {
    let state = common::test_state().await;

    let (user, org, token) =
        state.registration.register(common::register_request("Bob", "bob@example.com")).await.unwrap();

    assert_eq!(org.name, "Bob's Organisation");

    let orgs = state.memberships.organisations_of(&user.id).await.unwrap();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].id, org.id);

    // The token embeds the stable user identifier and resolves back to it.
    let claims = state.token_service.verify(&token).unwrap();
    assert_eq!(claims.sub, user.id.as_str());
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_a_second_user() {
    let state = common::test_state().await;

    let (first_user, _, _) =
        state.registration.register(common::register_request("Ada", "ada@example.com")).await.unwrap();

    let err = state
        .registration
        .register(common::register_request("Imposter", "ada@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Conflict { .. }));
    assert_eq!(err.status_code(), 409);

    // The original account is untouched.
    let found = state.users.get_user_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, first_user.id);
    assert_eq!(found.first_name, "Ada");
}

#[tokio::test]
async fn unique_index_rejects_duplicate_email_inside_the_transaction() {
    let state = common::test_state().await;

    let new_user = |first: &str| NewUser {
        id: UserId::new(),
        email: "ada@example.com".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        phone: None,
    };
    let new_org = |first: &str| NewOrganisation {
        id: OrgId::new(),
        name: format!("{}'s Organisation", first),
        description: None,
    };

    state
        .users
        .create_user_with_default_org(new_user("Ada"), new_org("Ada"))
        .await
        .unwrap();

    // Straight to the repository: no pre-insert email check runs here, so
    // the unique index is the only thing standing in the way.
    let err = state
        .users
        .create_user_with_default_org(new_user("Imposter"), new_org("Imposter"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Conflict { .. }));
    assert_eq!(err.status_code(), 409);
    assert_eq!(err.to_string(), "Resource conflict: Registration unsuccessful");
}

#[tokio::test]
async fn email_is_normalized_before_the_uniqueness_check() {
    let state = common::test_state().await;

    state.registration.register(common::register_request("Ada", "Ada@Example.com")).await.unwrap();

    let err = state
        .registration
        .register(common::register_request("Ada", "ada@example.COM"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict { .. }));
}

#[tokio::test]
async fn login_returns_user_and_verifiable_token() {
    let state = common::test_state().await;

    let (registered, _, _) =
        state.registration.register(common::register_request("Bob", "bob@example.com")).await.unwrap();

    let (user, token) = state
        .login
        .login(&LoginRequest { email: "bob@example.com".into(), password: "p4ssword".into() })
        .await
        .unwrap();

    assert_eq!(user.id, registered.id);
    let claims = state.token_service.verify(&token).unwrap();
    assert_eq!(claims.sub, user.id.as_str());
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let state = common::test_state().await;

    state.registration.register(common::register_request("Bob", "bob@example.com")).await.unwrap();

    let wrong_password = state
        .login
        .login(&LoginRequest { email: "bob@example.com".into(), password: "wrong".into() })
        .await
        .unwrap_err();

    let unknown_email = state
        .login
        .login(&LoginRequest { email: "nobody@example.com".into(), password: "p4ssword".into() })
        .await
        .unwrap_err();

    // Identical message and status for "no such user" and "wrong password".
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.status_code(), 401);
    assert_eq!(unknown_email.status_code(), 401);
}
