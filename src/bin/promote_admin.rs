use clap::error::ErrorKind;
use clap::Parser;

use scoreprobe::config::Config;
use scoreprobe::services::admin::{promote_to_admin, PromoteOutcome};

/// Promote a user to administrator by phone number
#[derive(Debug, Parser)]
#[command(name = "promote-admin")]
struct Cli {
    /// Phone number of the user to promote
    phone: String,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(_) => {
            println!("Usage: promote-admin <phone>");
            println!("Example: promote-admin 13800138000");
            std::process::exit(1);
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("❌ Operation failed: {}", e);
            return;
        }
    };

    // "Not found" and store failures both exit 0; only a missing argument is
    // a usage error
    match promote_to_admin(&config.database_path, &cli.phone).await {
        Ok(PromoteOutcome::Promoted) => {
            println!(
                "✅ Promoted user with phone {} to administrator",
                cli.phone
            );
        }
        Ok(PromoteOutcome::UserNotFound) => {
            println!("❌ No user found with phone {}", cli.phone);
        }
        Err(e) => {
            println!("❌ Operation failed: {}", e);
        }
    }
}
