//! Cron-driven daily posting.

use std::sync::Arc;

use drama_core::AppConfig;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::daily;

/// Runs the daily post on `config.daily_cron` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the cron expression is invalid or the scheduler cannot
/// be started.
pub(crate) async fn run_schedule(config: AppConfig) -> anyhow::Result<()> {
    let config = Arc::new(config);
    let mut scheduler = build_scheduler(Arc::clone(&config)).await?;
    tracing::info!(cron = %config.daily_cron, "scheduler started; waiting for the next run");

    tokio::signal::ctrl_c().await?;
    tracing::info!("received shutdown signal, stopping scheduler");
    scheduler.shutdown().await?;
    Ok(())
}

/// Builds and starts a scheduler with the daily-post job registered.
///
/// The returned handle must be kept alive; dropping it stops the job.
async fn build_scheduler(config: Arc<AppConfig>) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_daily_job(&scheduler, config).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_daily_job(
    scheduler: &JobScheduler,
    config: Arc<AppConfig>,
) -> Result<(), JobSchedulerError> {
    let cron = config.daily_cron.clone();
    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&config);

        Box::pin(async move {
            tracing::info!("scheduler: starting daily drama post");
            // A fresh Reddit token per run; tokens are short-lived.
            if let Err(e) = daily::run_daily_command(&config, false).await {
                tracing::error!(error = %e, "scheduler: daily drama post failed");
                return;
            }
            tracing::info!("scheduler: daily drama post complete");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
