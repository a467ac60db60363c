use std::sync::Arc;

use chrono::{FixedOffset, NaiveTime, Timelike};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::error;

use crate::admins::AdminDirectory;
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::context::Context;
use crate::jobs;
use crate::sender::Sender;
use crate::store::Store;

/// Registers the three daily jobs (reminder, last chance, report + clear)
/// and starts the scheduler. Times come from config in the reference
/// timezone; the cron engine runs in UTC, so they are shifted here.
pub async fn start<S, C, M, A>(
    config: &AppConfig,
    ctx: Context<S, C>,
    sender: M,
    admins: A,
) -> anyhow::Result<JobScheduler>
where
    S: Store + 'static,
    C: Clock + 'static,
    M: Sender + 'static,
    A: AdminDirectory + 'static,
{
    let ctx = Arc::new(ctx);
    let sender = Arc::new(sender);
    let admins = Arc::new(admins);

    let sched = JobScheduler::new().await?;

    {
        let ctx = ctx.clone();
        let sender = sender.clone();
        let cron = utc_cron(config.reminder_time, config.utc_offset);
        sched
            .add(Job::new_async(cron.as_str(), move |_, _| {
                let ctx = ctx.clone();
                let sender = sender.clone();
                Box::pin(async move {
                    if let Err(e) = jobs::send_reminder(&*ctx, &*sender).await {
                        error!("Reminder job failed: {:#}", e);
                    }
                })
            })?)
            .await?;
    }

    {
        let ctx = ctx.clone();
        let sender = sender.clone();
        let cron = utc_cron(config.last_chance_time, config.utc_offset);
        sched
            .add(Job::new_async(cron.as_str(), move |_, _| {
                let ctx = ctx.clone();
                let sender = sender.clone();
                Box::pin(async move {
                    if let Err(e) = jobs::send_last_chance(&*ctx, &*sender).await {
                        error!("Last-chance job failed: {:#}", e);
                    }
                })
            })?)
            .await?;
    }

    {
        let ctx = ctx.clone();
        let sender = sender.clone();
        let admins = admins.clone();
        let cron = utc_cron(config.report_time, config.utc_offset);
        sched
            .add(Job::new_async(cron.as_str(), move |_, _| {
                let ctx = ctx.clone();
                let sender = sender.clone();
                let admins = admins.clone();
                Box::pin(async move {
                    if let Err(e) = jobs::send_daily_report(&*ctx, &*sender, &*admins).await {
                        error!("Daily report job failed: {:#}", e);
                    }
                })
            })?)
            .await?;
    }

    sched.start().await?;
    Ok(sched)
}

fn utc_cron(local: NaiveTime, offset: FixedOffset) -> String {
    let seconds = (local.num_seconds_from_midnight() as i64 - offset.local_minus_utc() as i64)
        .rem_euclid(86_400);
    format!("0 {} {} * * *", (seconds % 3600) / 60, seconds / 3600)
}
