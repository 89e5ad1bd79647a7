use reqwest::Method;
use serde_json::{json, Value};

use crate::models::{TestCase, UserFixture};
use crate::services::runner::{fresh_phone, RunContext};

/// Authentication endpoints (cases 1.1 - 1.8)
pub async fn run(ctx: &mut RunContext) {
    tracing::info!("Testing authentication endpoints");
    ctx.report.section("1. Authentication");

    // 1.1 register user1; the counted case does not capture its cookie
    let user1_phone = fresh_phone("138");
    let response = ctx
        .run_case(
            TestCase::new("1.1 Register", Method::POST, "/auth/register").with_body(json!({
                "phone": user1_phone,
                "nickname": "Test User 1",
                "password": "123456",
            })),
        )
        .await;

    if let Some(id) = response
        .as_ref()
        .and_then(|v| v.pointer("/data/user/id"))
        .and_then(Value::as_i64)
    {
        tracing::info!(user_id = id, "Created user1");
        ctx.users.push(UserFixture {
            id,
            phone: user1_phone.clone(),
            nickname: "Test User 1".to_string(),
            password: "123456".to_string(),
        });
    }

    // user2 registers out of band so later cases have a live credential
    ctx.register_identity("user2", "139", "Test User 2", "123456")
        .await;

    // 1.2 login user1
    let response = ctx
        .run_case(
            TestCase::new("1.2 Login", Method::POST, "/auth/login").with_body(json!({
                "phone": user1_phone,
                "password": "123456",
            })),
        )
        .await;

    if response.is_some() {
        // Second, uncounted login to capture the cookie. The duplicate
        // round-trip is intentional and must stay.
        ctx.login_identity("user1", &user1_phone, "123456").await;
    }

    // 1.3 current user info
    ctx.run_case(
        TestCase::new("1.3 Current user info", Method::GET, "/auth/me")
            .with_credential(ctx.credential("user2")),
    )
    .await;

    // 1.4 change nickname
    ctx.run_case(
        TestCase::new("1.4 Change nickname", Method::PUT, "/auth/nickname")
            .with_body(json!({"nickname": "Updated Nickname"}))
            .with_credential(ctx.credential("user2")),
    )
    .await;

    // 1.5 change password
    ctx.run_case(
        TestCase::new("1.5 Change password", Method::PUT, "/auth/password")
            .with_body(json!({
                "old_password": "123456",
                "new_password": "654321",
            }))
            .with_credential(ctx.credential("user2")),
    )
    .await;

    // 1.6 logout
    ctx.run_case(
        TestCase::new("1.6 Logout", Method::POST, "/auth/logout")
            .with_credential(ctx.credential("user2")),
    )
    .await;

    // 1.7 protected endpoint without a credential
    ctx.run_case(
        TestCase::new(
            "1.7 Unauthenticated access to protected endpoint (must fail)",
            Method::GET,
            "/auth/me",
        )
        .expect_code(401)
        .expect_status(401),
    )
    .await;

    // 1.8 the same phone number cannot register twice
    ctx.run_case(
        TestCase::new(
            "1.8 Duplicate registration (must fail)",
            Method::POST,
            "/auth/register",
        )
        .with_body(json!({
            "phone": user1_phone,
            "nickname": "Test User 1",
            "password": "123456",
        }))
        .expect_code(400)
        .expect_status(400),
    )
    .await;
}
