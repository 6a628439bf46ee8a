mod common;

use axum::http::StatusCode;
use chrono::TimeDelta;
use common::*;
use shiptrack::auth::{Role, TokenCodec};
use shiptrack::store::UserStore;

#[tokio::test]
async fn root_redirects_anonymous_visitors_to_login() {
    let (app, _) = test_app();
    let response = get(&app, "/", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn root_redirects_a_known_session_to_its_dashboard() {
    let (app, _) = test_app();
    signup(&app, "Alice", "a@x.com", "secret123", "user").await;
    let cookie = login_cookie(&app, "a@x.com", "secret123").await;

    let response = get(&app, "/", Some(&cookie)).await;
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn root_treats_a_broken_session_as_anonymous() {
    // The optional tier never fails; a garbage cookie just means anonymous,
    // though the response still clears it.
    let (app, _) = test_app();
    let response = get(&app, "/", Some("garbage")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(session_cleared(&response));
}

#[tokio::test]
async fn signup_then_login_reaches_the_dashboard() {
    let (app, _) = test_app();
    signup(&app, "Alice", "a@x.com", "secret123", "user").await;

    let response = login(&app, "a@x.com", "secret123").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let cookie = session_cookie(&response).unwrap();

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Welcome, Alice"));
}

#[tokio::test]
async fn login_with_wrong_password_issues_no_cookie() {
    let (app, store) = test_app();
    signup(&app, "Alice", "a@x.com", "secret123", "user").await;

    let response = login(&app, "a@x.com", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=Invalid+credentials");
    assert!(session_cookie(&response).is_none());

    let attempts = store.login_attempts();
    assert_eq!(attempts.len(), 1);
    assert!(!attempts[0].success);
}

#[tokio::test]
async fn unknown_email_fails_like_wrong_password() {
    let (app, _) = test_app();
    let response = login(&app, "ghost@x.com", "secret123").await;
    assert_eq!(location(&response), "/login?error=Invalid+credentials");
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let (app, _) = test_app();
    signup(&app, "Alice", "a@x.com", "secret123", "user").await;

    let body = "fullname=Bob&email=a@x.com&password=pw123456&confirm_password=pw123456&role=user";
    let response = post_form(&app, "/signup", body, None).await;
    assert_eq!(location(&response), "/signup?error=Email+already+registered.");
}

#[tokio::test]
async fn signup_password_mismatch_is_rejected() {
    let (app, store) = test_app();
    let body = "fullname=Alice&email=a@x.com&password=one&confirm_password=two&role=user";
    let response = post_form(&app, "/signup", body, None).await;
    assert_eq!(location(&response), "/signup?error=Passwords+do+not+match.");
    assert!(store.find_by_email("a@x.com").unwrap().is_none());
}

#[tokio::test]
async fn unknown_signup_role_coerces_to_user() {
    let (app, store) = test_app();
    signup(&app, "Alice", "a@x.com", "secret123", "superuser").await;
    let user = store.find_by_email("a@x.com").unwrap().unwrap();
    assert_eq!(user.role, Role::User);
}

#[tokio::test]
async fn dashboard_requires_a_session() {
    let (app, _) = test_app();
    let response = get(&app, "/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=Authentication+required.");
}

#[tokio::test]
async fn garbage_cookie_redirects_and_clears_the_session() {
    let (app, _) = test_app();
    let response = get(&app, "/dashboard", Some("garbage")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/login?error=Session+expired+or+invalid."
    );
    assert!(session_cleared(&response));
}

#[tokio::test]
async fn expired_session_is_rejected() {
    let (app, _) = test_app();
    signup(&app, "Alice", "a@x.com", "secret123", "user").await;

    let codec = TokenCodec::from_config(&test_auth_config());
    let expired = codec
        .encode("a@x.com", Role::User, Some(TimeDelta::minutes(-5)))
        .unwrap();

    let response = get(&app, "/dashboard", Some(&expired)).await;
    assert_eq!(
        location(&response),
        "/login?error=Session+expired+or+invalid."
    );
}

#[tokio::test]
async fn deleting_a_user_invalidates_their_live_session() {
    let (app, store) = test_app();
    signup(&app, "Alice", "a@x.com", "secret123", "user").await;
    let cookie = login_cookie(&app, "a@x.com", "secret123").await;

    let user = store.find_by_email("a@x.com").unwrap().unwrap();
    store.delete(user.id).unwrap();

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=User+not+found.");
}

#[tokio::test]
async fn admin_tier_checks_authentication_before_role() {
    let (app, _) = test_app();

    // Anonymous: authentication failure, not an authorization one.
    let response = get(&app, "/Manageusers", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=Authentication+required.");

    // Authenticated but not admin: forbidden, and no login redirect.
    signup(&app, "Alice", "a@x.com", "secret123", "user").await;
    let cookie = login_cookie(&app, "a@x.com", "secret123").await;
    let response = get(&app, "/Manageusers", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_login_lands_on_the_admin_dashboard() {
    let (app, _) = test_app();
    signup(&app, "Root", "root@x.com", "secret123", "admin").await;

    let response = login(&app, "root@x.com", "secret123").await;
    assert_eq!(location(&response), "/admin-dashboard");
    let cookie = session_cookie(&response).unwrap();

    let response = get(&app, "/admin-dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Root"));
}

#[tokio::test]
async fn user_dashboard_bounces_admins_to_their_own() {
    let (app, _) = test_app();
    signup(&app, "Root", "root@x.com", "secret123", "admin").await;
    let cookie = login_cookie(&app, "root@x.com", "secret123").await;

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin-dashboard");
}

#[tokio::test]
async fn login_page_skips_the_form_for_a_live_session() {
    let (app, _) = test_app();
    signup(&app, "Alice", "a@x.com", "secret123", "user").await;
    let cookie = login_cookie(&app, "a@x.com", "secret123").await;

    let response = get(&app, "/login", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let (app, _) = test_app();
    signup(&app, "Alice", "a@x.com", "secret123", "user").await;
    let cookie = login_cookie(&app, "a@x.com", "secret123").await;

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?message=Logged+out+successfully");
    assert!(session_cleared(&response));
}

#[tokio::test]
async fn successful_logins_are_recorded() {
    let (app, store) = test_app();
    signup(&app, "Alice", "a@x.com", "secret123", "user").await;
    login_cookie(&app, "a@x.com", "secret123").await;

    let attempts = store.login_attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].email, "a@x.com");
    assert!(attempts[0].success);
}
