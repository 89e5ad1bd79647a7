use crate::services::api_client::Payload;
use crate::services::runner::RunContext;

/// Liveness probe; the whole run aborts before any scenario when this fails
pub async fn check_server_health(ctx: &mut RunContext) -> bool {
    tracing::info!("Checking server health");
    ctx.report.section("0. Health Check");

    match ctx.client.ping().await {
        Ok(response) if response.status == 200 => {
            tracing::info!("Server health check passed");
            ctx.report.push("**Server status**: ✅ up\n");
            match &response.payload {
                Payload::Json(value) => ctx.report.push(format!("**Response**: {}\n", value)),
                Payload::Text(text) => ctx.report.push(format!("**Response**: {}\n", text)),
            }
            true
        }
        Ok(response) => {
            tracing::error!(status = response.status, "Server health check failed");
            ctx.report.push(format!(
                "**Server status**: ❌ unhealthy (status: {})\n",
                response.status
            ));
            false
        }
        Err(e) => {
            tracing::error!(error = %e, "Cannot reach server");
            ctx.report
                .push(format!("**Server status**: ❌ unreachable - {}\n", e));
            false
        }
    }
}
