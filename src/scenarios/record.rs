use reqwest::Method;

use crate::models::TestCase;
use crate::services::runner::RunContext;

/// Score record endpoints (cases 5.1 - 5.2)
pub async fn run(ctx: &mut RunContext) {
    tracing::info!("Testing record endpoints");
    ctx.report.section("5. Records");

    // 5.1 tonight's records
    ctx.run_case(
        TestCase::new("5.1 Tonight's records", Method::GET, "/records/tonight")
            .with_credential(ctx.credential("user1")),
    )
    .await;

    // 5.2 explicit time range
    ctx.run_case(
        TestCase::new(
            "5.2 Records in a time range",
            Method::GET,
            "/records/tonight?start_time=2025-11-06T00:00:00Z&end_time=2025-11-07T00:00:00Z",
        )
        .with_credential(ctx.credential("user1")),
    )
    .await;
}
