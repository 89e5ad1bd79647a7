use anyhow::Context;

use scoreprobe::config::Config;
use scoreprobe::scenarios;
use scoreprobe::services::RunContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; progress lines carry timestamp and level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Poker score backend API test");

    let config = Config::from_env().context("Failed to load configuration")?;
    let mut ctx = RunContext::new(config).context("Failed to create run context")?;

    // A dead server fails everything; bail out before any scenario runs
    if !scenarios::health::check_server_health(&mut ctx).await {
        tracing::error!("Server is not running, start the backend first");
        std::process::exit(1);
    }

    scenarios::auth::run(&mut ctx).await;
    scenarios::room::run(&mut ctx).await;
    scenarios::operation::run(&mut ctx).await;
    scenarios::operation::run_niuniu(&mut ctx).await;
    scenarios::settlement::run(&mut ctx).await;
    scenarios::record::run(&mut ctx).await;
    scenarios::admin::run(&mut ctx).await;

    // The in-memory verdict decides the exit status; a report write failure
    // does not change it
    match ctx.write_report() {
        Ok(()) => tracing::info!(path = %ctx.config.report_path, "Test report saved"),
        Err(e) => tracing::error!(error = %e, "Failed to save test report"),
    }

    tracing::info!(
        total = ctx.stats.total,
        passed = ctx.stats.passed,
        failed = ctx.stats.failed,
        pass_rate = %format!("{:.2}%", ctx.stats.pass_rate()),
        "Test run complete"
    );

    if !ctx.stats.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
