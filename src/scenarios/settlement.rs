use reqwest::Method;
use serde_json::Value;

use crate::models::TestCase;
use crate::services::runner::RunContext;

/// Settlement endpoints (cases 4.1 - 4.2)
pub async fn run(ctx: &mut RunContext) {
    tracing::info!("Testing settlement endpoints");
    ctx.report.section("4. Settlement");

    let Some(room_id) = ctx.rooms.first().map(|r| r.id) else {
        tracing::warn!("Skipping settlement scenarios: no room was created");
        return;
    };

    // 4.1 initiate settlement
    let response = ctx
        .run_case(
            TestCase::new(
                "4.1 Initiate settlement",
                Method::POST,
                format!("/rooms/{}/settlement/initiate", room_id),
            )
            .with_credential(ctx.credential("user1")),
        )
        .await;

    // 4.2 confirm only when the server says the room can settle
    let can_settle = response
        .as_ref()
        .and_then(|v| v.pointer("/data/can_settle"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if can_settle {
        ctx.run_case(
            TestCase::new(
                "4.2 Confirm settlement",
                Method::POST,
                format!("/rooms/{}/settlement/confirm", room_id),
            )
            .with_credential(ctx.credential("user1")),
        )
        .await;
    }
}
