use reqwest::Method;
use serde_json::{json, Value};

use crate::models::TestCase;
use crate::services::runner::RunContext;

/// Betting and withdrawal endpoints in the texas room (cases 3.1 - 3.6)
pub async fn run(ctx: &mut RunContext) {
    tracing::info!("Testing room operation endpoints");
    ctx.report.section("3. Room Operations");

    let Some(room_id) = ctx.rooms.first().map(|r| r.id) else {
        tracing::warn!("Skipping operation scenarios: no room was created");
        return;
    };

    // 3.1 bet
    ctx.run_case(
        TestCase::new("3.1 Bet", Method::POST, format!("/rooms/{}/bet", room_id))
            .with_body(json!({"amount": 100}))
            .with_credential(ctx.credential("user1")),
    )
    .await;

    // 3.2 bet again
    ctx.run_case(
        TestCase::new(
            "3.2 Bet again",
            Method::POST,
            format!("/rooms/{}/bet", room_id),
        )
        .with_body(json!({"amount": 200}))
        .with_credential(ctx.credential("user1")),
    )
    .await;

    // 3.3 withdraw part of the chips
    ctx.run_case(
        TestCase::new(
            "3.3 Withdraw",
            Method::POST,
            format!("/rooms/{}/withdraw", room_id),
        )
        .with_body(json!({"amount": 150}))
        .with_credential(ctx.credential("user1")),
    )
    .await;

    // 3.4 amount 0 withdraws everything
    ctx.run_case(
        TestCase::new(
            "3.4 Withdraw all",
            Method::POST,
            format!("/rooms/{}/withdraw", room_id),
        )
        .with_body(json!({"amount": 0}))
        .with_credential(ctx.credential("user1")),
    )
    .await;

    // 3.5 paged operation history
    ctx.run_case(
        TestCase::new(
            "3.5 Operation history",
            Method::GET,
            format!("/rooms/{}/operations?limit=10&offset=0", room_id),
        )
        .with_credential(ctx.credential("user1")),
    )
    .await;

    // 3.6 per-user history amounts
    ctx.run_case(
        TestCase::new(
            "3.6 History amounts",
            Method::GET,
            format!("/rooms/{}/history-amounts", room_id),
        )
        .with_credential(ctx.credential("user1")),
    )
    .await;
}

/// Niuniu variant (cases 3.7 - 3.9). The niuniu room deliberately stays out
/// of the room fixture registry; only its own cases use it.
pub async fn run_niuniu(ctx: &mut RunContext) {
    tracing::info!("Testing niuniu operations");
    ctx.report.push("\n### Niuniu Room Operations\n");

    // 3.7 create a niuniu room
    let response = ctx
        .run_case(
            TestCase::new("3.7 Create room (niuniu)", Method::POST, "/rooms")
                .with_body(json!({"room_type": "niuniu", "chip_rate": "10:1"}))
                .with_credential(ctx.credential("user1")),
        )
        .await;

    let Some(data) = response.as_ref().and_then(|v| v.get("data")) else {
        return;
    };
    let (Some(room_id), Some(room_code)) = (
        data.get("room_id").and_then(Value::as_i64),
        data.get("room_code").and_then(Value::as_str),
    ) else {
        return;
    };

    // 3.8 another user joins the niuniu room
    if ctx.session("user3").is_some() {
        ctx.run_case(
            TestCase::new("3.8 Join niuniu room", Method::POST, "/rooms/join")
                .with_body(json!({"room_code": room_code}))
                .with_credential(ctx.credential("user3")),
        )
        .await;
    }

    // 3.9 niuniu bet targeting another player
    if ctx.users.len() >= 2 {
        let to_user_id = ctx.users[1].id;
        ctx.run_case(
            TestCase::new(
                "3.9 Niuniu bet",
                Method::POST,
                format!("/rooms/{}/niuniu-bet", room_id),
            )
            .with_body(json!({
                "bets": [
                    {"to_user_id": to_user_id, "amount": 50}
                ]
            }))
            .with_credential(ctx.credential("user1")),
        )
        .await;
    }
}
