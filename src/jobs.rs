use std::collections::HashSet;

use anyhow::Result;
use futures::future::join_all;
use tracing::{error, info};

use crate::admins::AdminDirectory;
use crate::clock::Clock;
use crate::context::Context;
use crate::reports;
use crate::sender::Sender;
use crate::store::Store;

const LAST_CHANCE_TEXT: &str = "🚨 Осталось 5 минут чтобы отправить свою локацию.";

const QUESTIONNAIRE_TEXT: &str = "Товарищи, напоминаю про новые правила котлового довольствия:\n\
    Если на вас пишется рапорт, то вы записываетесь на все обеды по будним дням, \
    и даже если не будете питаться в конкретный день - всё равно за него заплатите.\n\
    В очередной раз провожу опрос, кто будет питаться в столовой ППД. \
    Если вы согласны питаться в столовой ППД на таких условиях, проголосуйте ниже соответствующей кнопкой.\n\
    В понедельник будет писаться рапорт, кто не успел будет писать его за себя самостоятельно.";

/// Sends `text` to every recipient, logging failures per recipient and never
/// aborting the batch.
async fn broadcast<M: Sender>(sender: &M, recipients: &[i64], text: &str) {
    let sends = recipients.iter().map(|&id| async move {
        if let Err(e) = sender.send(id, text).await {
            error!("Failed to send to {}: {:#}", id, e);
        }
    });
    join_all(sends).await;
}

/// Evening reminder to every registered user.
pub async fn send_reminder<S: Store, C: Clock, M: Sender>(
    ctx: &Context<S, C>,
    sender: &M,
) -> Result<()> {
    info!("Sending check-in reminders");
    let text = format!(
        "🚨 Отправьте геолокацию с {} до {}.",
        ctx.rules.window_start.format("%H:%M"),
        ctx.rules.window_end.format("%H:%M")
    );
    let ids: Vec<i64> = ctx
        .store
        .list_users()
        .await?
        .iter()
        .map(|u| u.telegram_id)
        .collect();
    broadcast(sender, &ids, &text).await;
    Ok(())
}

/// Warning to everyone who has not checked in yet today.
pub async fn send_last_chance<S: Store, C: Clock, M: Sender>(
    ctx: &Context<S, C>,
    sender: &M,
) -> Result<()> {
    info!("Sending last-chance warnings");
    let users = ctx.store.list_users().await?;
    let checked: HashSet<i64> = ctx
        .store
        .list_today_controls()
        .await?
        .iter()
        .map(|c| c.telegram_id)
        .collect();

    let ids: Vec<i64> = users
        .iter()
        .map(|u| u.telegram_id)
        .filter(|id| !checked.contains(id))
        .collect();
    broadcast(sender, &ids, LAST_CHANCE_TEXT).await;
    Ok(())
}

/// Builds the attendance report, sends it to the administrators and clears
/// today's marks. The clear is the daily rollover and runs however the sends
/// went; only a failure to read the store keeps the marks in place.
pub async fn send_daily_report<S: Store, C: Clock, M: Sender, A: AdminDirectory>(
    ctx: &Context<S, C>,
    sender: &M,
    admins: &A,
) -> Result<()> {
    info!("Sending the daily report to administrators");
    let report = reports::attendance(&ctx.store).await?;

    match admins.list_admin_ids().await {
        Ok(ids) => broadcast(sender, &ids, &report).await,
        Err(e) => error!("Failed to load admin ids: {:#}", e),
    }

    ctx.store.clear_today_controls().await?;
    info!("Today's marks cleared");
    Ok(())
}

/// Starts a questionnaire campaign by messaging every registered user.
/// The answers come back through the transport layer.
pub async fn send_questionnaire<S: Store, C: Clock, M: Sender>(
    ctx: &Context<S, C>,
    sender: &M,
) -> Result<()> {
    info!("Broadcasting the questionnaire");
    let ids: Vec<i64> = ctx
        .store
        .list_users()
        .await?
        .iter()
        .map(|u| u.telegram_id)
        .collect();
    broadcast(sender, &ids, QUESTIONNAIRE_TEXT).await;
    Ok(())
}
