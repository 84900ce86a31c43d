#![allow(clippy::unwrap_used, clippy::expect_used)]

use realm_sdk::{AuthenticatedIdentity, AuthenticationOutcome};

#[test]
fn identity_serializes_roles_in_order() {
    let identity = AuthenticatedIdentity::new("jane", vec!["user".to_owned(), "admin".to_owned()]);

    let json = serde_json::to_value(&identity).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "principal": "jane", "roles": ["user", "admin"] })
    );
}

#[test]
fn not_authenticated_has_no_identity() {
    let outcome = AuthenticationOutcome::NotAuthenticated;

    assert!(outcome.identity().is_none());
    assert_eq!(format!("{outcome:?}"), "NotAuthenticated");
}
