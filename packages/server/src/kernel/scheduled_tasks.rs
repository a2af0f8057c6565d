//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! The placement expiry sweep runs on a cron schedule (hourly by default,
//! configurable). The stale listing purge is admin-triggered through its
//! endpoint; operators who want it periodic opt in via
//! `LISTING_PURGE_ENABLED`, since it hard-deletes listings regardless of
//! approval status. The sweep is also exposed as an admin endpoint and the
//! `expiry_sweep` binary, so a missed tick is recoverable by hand.

use anyhow::Result;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::Config;
use crate::domains::listings::machines as listings_machines;
use crate::domains::listings::models::Listing;
use crate::domains::placements::effects::run_expiry_sweep;

/// Start all scheduled tasks
pub async fn start_scheduler(pool: PgPool, config: &Config) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Placement expiry sweep
    let sweep_pool = pool.clone();
    let sweep_job = Job::new_async(config.expiry_sweep_schedule.as_str(), move |_uuid, _lock| {
        let pool = sweep_pool.clone();
        Box::pin(async move {
            match run_expiry_sweep(&pool).await {
                Ok(count) if count > 0 => {
                    tracing::info!("Expiry sweep complete: {} placements expired", count)
                }
                Ok(_) => tracing::debug!("Expiry sweep complete: nothing due"),
                Err(e) => tracing::error!("Expiry sweep task failed: {}", e),
            }
        })
    })?;

    scheduler.add(sweep_job).await?;

    // Stale listing purge - daily at 03:00 UTC, opt-in only
    if config.listing_purge_enabled {
        let purge_pool = pool.clone();
        let purge_age_days = config.listing_purge_age_days;
        let purge_job = Job::new_async("0 0 3 * * *", move |_uuid, _lock| {
            let pool = purge_pool.clone();
            Box::pin(async move {
                if let Err(e) = run_listing_purge(&pool, purge_age_days).await {
                    tracing::error!("Listing purge task failed: {}", e);
                }
            })
        })?;

        scheduler.add(purge_job).await?;
    }

    scheduler.start().await?;

    tracing::info!(
        schedule = %config.expiry_sweep_schedule,
        purge_enabled = config.listing_purge_enabled,
        "Scheduled tasks started"
    );
    Ok(scheduler)
}

/// Run the stale listing purge task
async fn run_listing_purge(pool: &PgPool, age_days: i64) -> Result<()> {
    tracing::info!("Running listing purge task");

    listings_machines::validate_purge_age(age_days)?;
    let deleted = Listing::purge_older_than(age_days, pool).await?;

    tracing::info!(
        "Listing purge complete: deleted {} listings older than {} days",
        deleted,
        age_days
    );

    Ok(())
}
