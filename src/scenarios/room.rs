use reqwest::Method;
use serde_json::{json, Value};

use crate::models::{RoomFixture, TestCase};
use crate::services::runner::RunContext;

/// Room lifecycle endpoints (cases 2.1 - 2.5)
pub async fn run(ctx: &mut RunContext) {
    tracing::info!("Testing room endpoints");
    ctx.report.section("2. Rooms");

    if ctx.session("user1").is_none() {
        tracing::warn!("Skipping room scenarios: no user1 session from the auth scenario");
        return;
    }

    // 2.1 create a texas room
    let response = ctx
        .run_case(
            TestCase::new("2.1 Create room (texas)", Method::POST, "/rooms")
                .with_body(json!({"room_type": "texas", "chip_rate": "20:1"}))
                .with_credential(ctx.credential("user1")),
        )
        .await;

    if let Some(data) = response.as_ref().and_then(|v| v.get("data")) {
        if let (Some(id), Some(code)) = (
            data.get("room_id").and_then(Value::as_i64),
            data.get("room_code").and_then(Value::as_str),
        ) {
            tracing::info!(room_id = id, room_code = code, "Created room");
            ctx.rooms.push(RoomFixture {
                id,
                code: code.to_string(),
                room_type: "texas".to_string(),
            });
        }
    }

    // 2.2 a third user joins by room code
    if let Some(room_code) = ctx.rooms.first().map(|r| r.code.clone()) {
        if ctx
            .register_identity("user3", "137", "Test User 3", "123456")
            .await
            .is_some()
        {
            ctx.run_case(
                TestCase::new("2.2 Join room", Method::POST, "/rooms/join")
                    .with_body(json!({"room_code": room_code}))
                    .with_credential(ctx.credential("user3")),
            )
            .await;
        }
    }

    // 2.3 room detail
    if let Some(room_id) = ctx.rooms.first().map(|r| r.id) {
        ctx.run_case(
            TestCase::new("2.3 Room detail", Method::GET, format!("/rooms/{}", room_id))
                .with_credential(ctx.credential("user1")),
        )
        .await;
    }

    // 2.4 return to last room
    ctx.run_case(
        TestCase::new("2.4 Last room", Method::GET, "/rooms/last")
            .with_credential(ctx.credential("user1")),
    )
    .await;

    // 2.5 kick the third user out
    if let Some(room_id) = ctx.rooms.first().map(|r| r.id) {
        if ctx.users.len() >= 3 {
            let target = ctx.users[2].id;
            ctx.run_case(
                TestCase::new(
                    "2.5 Kick user",
                    Method::POST,
                    format!("/rooms/{}/kick", room_id),
                )
                .with_body(json!({"user_id": target}))
                .with_credential(ctx.credential("user1")),
            )
            .await;
        }
    }
}
