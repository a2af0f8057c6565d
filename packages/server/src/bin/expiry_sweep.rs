// One-shot placement expiry sweep.
//
// Same transition the hourly scheduler applies, runnable by hand or from an
// external cron when the server's scheduler is disabled.

use anyhow::{Context, Result};
use clap::Parser;
use server_core::domains::placements::effects::run_expiry_sweep;
use server_core::domains::placements::models::Placement;
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(about = "Expire active placements whose paid window has elapsed")]
struct Args {
    /// Report what would expire without applying the transition
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    if args.dry_run {
        let due = Placement::count_due_for_expiry(&pool)
            .await
            .context("Dry-run count failed")?;
        tracing::info!(due, "Dry run: placements due for expiry");
        return Ok(());
    }

    let expired = run_expiry_sweep(&pool)
        .await
        .context("Expiry sweep failed")?;
    tracing::info!(expired, "Expiry sweep complete");

    Ok(())
}
