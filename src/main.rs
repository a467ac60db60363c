use attendance_control::admins::FileAdminDirectory;
use attendance_control::clock::SystemClock;
use attendance_control::config::AppConfig;
use attendance_control::context::Context;
use attendance_control::scheduler;
use attendance_control::sender::LogSender;
use attendance_control::store::{self, PgStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Attendance Control Service...");

    // Init DB
    let pool = store::init_pool(&config.database_url).await?;
    store::ensure_schema(&pool).await?;
    info!("Connected to database");

    let ctx = Context::new(
        PgStore::new(pool),
        SystemClock::new(config.utc_offset),
        config.checkin_rules(),
    );
    let admins = FileAdminDirectory::new(&config.admins_file);
    // TODO: swap for the Telegram transport adapter once it is extracted
    // from the bot frontend.
    let sender = LogSender;

    let _sched = scheduler::start(&config, ctx, sender, admins).await?;
    info!("Scheduler started");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}
