use std::time::Duration;

use reqwest::Method;

use crate::models::TestCase;
use crate::services::admin::{promote_to_admin, PromoteOutcome};
use crate::services::runner::RunContext;

/// Administration endpoints (cases 6.1 - 6.6), including the out-of-band
/// role promotion in the user store
pub async fn run(ctx: &mut RunContext) {
    tracing::info!("Testing admin endpoints");
    ctx.report.section("6. Administration");

    // 6.1 ordinary user is rejected
    ctx.run_case(
        TestCase::new(
            "6.1 Admin listing as ordinary user (must fail)",
            Method::GET,
            "/admin/users",
        )
        .with_credential(ctx.credential("user1"))
        .expect_code(403)
        .expect_status(403),
    )
    .await;

    let Some(admin) = ctx
        .register_identity("admin", "188", "Admin", "admin123")
        .await
    else {
        tracing::warn!("Skipping admin scenarios: could not register the admin user");
        return;
    };

    // Promote out of band; no API endpoint exposes this operational action
    tracing::info!(phone = %admin.phone, user_id = admin.id, "Promoting user to administrator");
    ctx.report.push(format!(
        "\n**Note**: role for phone {} set to 'admin' directly in the user store\n",
        admin.phone
    ));

    let db_path = ctx.config.database_path.clone();
    match promote_to_admin(&db_path, &admin.phone).await {
        Ok(PromoteOutcome::Promoted) => {
            tracing::info!("User promoted to administrator");
            // Give the backend a beat, then log in again so the session
            // reflects the new role. The old cookie still carries 'user'.
            tokio::time::sleep(Duration::from_millis(500)).await;
            ctx.login_identity("admin", &admin.phone, &admin.password)
                .await;
        }
        Ok(PromoteOutcome::UserNotFound) => {
            tracing::warn!(phone = %admin.phone, "Promotion found no matching user");
            ctx.report
                .push("**Warning**: promotion did not match any user\n");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Promotion failed");
            ctx.report
                .push(format!("**Warning**: promotion failed: {}\n", e));
        }
    }

    // 6.2 list users
    ctx.run_case(
        TestCase::new(
            "6.2 List users",
            Method::GET,
            "/admin/users?page=1&page_size=20",
        )
        .with_credential(ctx.credential("admin")),
    )
    .await;

    // 6.3 list rooms
    ctx.run_case(
        TestCase::new(
            "6.3 List rooms",
            Method::GET,
            "/admin/rooms?status=all&page=1&page_size=20",
        )
        .with_credential(ctx.credential("admin")),
    )
    .await;

    // 6.4 room detail
    if let Some(room_id) = ctx.rooms.first().map(|r| r.id) {
        ctx.run_case(
            TestCase::new(
                "6.4 Room detail (admin)",
                Method::GET,
                format!("/admin/rooms/{}", room_id),
            )
            .with_credential(ctx.credential("admin")),
        )
        .await;
    }

    // 6.5 a user's settlement history
    if let Some(user_id) = ctx.users.first().map(|u| u.id) {
        ctx.run_case(
            TestCase::new(
                "6.5 User settlement history",
                Method::GET,
                format!("/admin/users/{}/settlements", user_id),
            )
            .with_credential(ctx.credential("admin")),
        )
        .await;
    }

    // 6.6 room membership history
    ctx.run_case(
        TestCase::new(
            "6.6 Room member history",
            Method::GET,
            "/admin/room-member-history?page=1&page_size=50",
        )
        .with_credential(ctx.credential("admin")),
    )
    .await;
}
