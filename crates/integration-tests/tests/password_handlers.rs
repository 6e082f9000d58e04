//! Forgot-password and reset-password against a mock backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use forecast_portal_client::handlers::messages;
use forecast_portal_client::{MemorySessionStore, Outcome, Route};
use forecast_portal_core::{FormData, PasswordResetConfirmation, PasswordResetRequest};
use forecast_portal_integration_tests::{RecordingPage, TestContext, closed_port_uri, gateway_for};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_forgot_password_success_prefixes_message() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/forgot-password"))
        .and(body_json(json!({"email": "alice@example.com"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Reset link sent"})),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let form = FormData::new().with("email", "alice@example.com");
    let outcome = ctx
        .controller("forgot-password.html")
        .submit::<PasswordResetRequest>(&form)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Accepted);
    assert_eq!(ctx.page.alerts(), vec!["📩 Reset link sent"]);
    assert!(ctx.page.navigations().is_empty());
}

#[tokio::test]
async fn test_forgot_password_unknown_email_prefixes_warning() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/forgot-password"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Email not found"})))
        .mount(&ctx.server)
        .await;

    let form = FormData::new().with("email", "nobody@example.com");
    let outcome = ctx
        .controller("forgot-password.html")
        .submit::<PasswordResetRequest>(&form)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Rejected);
    assert_eq!(ctx.page.alerts(), vec!["⚠️ Email not found"]);
}

#[tokio::test]
async fn test_forgot_password_unreadable_response_shows_try_again() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/forgot-password"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&ctx.server)
        .await;

    let form = FormData::new().with("email", "alice@example.com");
    let outcome = ctx
        .controller("forgot-password.html")
        .submit::<PasswordResetRequest>(&form)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Unreachable);
    assert_eq!(ctx.page.alerts(), vec![messages::TRY_AGAIN]);
}

#[tokio::test]
async fn test_forgot_password_refused_connection_shows_try_again() {
    let gateway = gateway_for(&closed_port_uri(), Arc::new(MemorySessionStore::new()));
    let page = RecordingPage::new();

    let outcome = gateway
        .forgot_password(
            &page,
            &PasswordResetRequest {
                email: "alice@example.com".to_owned(),
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Unreachable);
    assert_eq!(page.alerts(), vec![messages::TRY_AGAIN]);
    assert!(page.navigations().is_empty());
}

#[tokio::test]
async fn test_reset_password_takes_token_from_location() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/reset-password"))
        .and(body_json(json!({"token": "tok-42", "new_password": "n3w"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Password reset successful"})),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let form = FormData::new().with("newPassword", "n3w");
    let outcome = ctx
        .controller("reset-password.html?token=tok-42")
        .submit::<PasswordResetConfirmation>(&form)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Accepted);
    assert_eq!(ctx.page.alerts(), vec!["Password reset successful"]);
    assert_eq!(ctx.page.navigations(), vec![Route::Landing]);
}

#[tokio::test]
async fn test_reset_password_missing_token_is_sent_as_null() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/reset-password"))
        .and(body_json(json!({"token": null, "new_password": "n3w"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Missing data"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let form = FormData::new().with("newPassword", "n3w");
    let outcome = ctx
        .controller("reset-password.html")
        .submit::<PasswordResetConfirmation>(&form)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Rejected);
    assert_eq!(ctx.page.alerts(), vec!["Missing data"]);
    assert!(ctx.page.navigations().is_empty());
}

#[tokio::test]
async fn test_reset_password_rejected_prefers_message() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/reset-password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Token expired",
            "error": "Invalid token"
        })))
        .mount(&ctx.server)
        .await;

    ctx.gateway
        .reset_password(
            &ctx.page,
            &PasswordResetConfirmation::new(Some("old".to_string()), "n3w"),
        )
        .await
        .unwrap();

    assert_eq!(ctx.page.alerts(), vec!["Token expired"]);
    assert!(ctx.page.navigations().is_empty());
}
