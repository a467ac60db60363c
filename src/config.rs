use anyhow::{Context as _, Result};
use chrono::{FixedOffset, NaiveTime};
use dotenvy::dotenv;
use std::env;

use crate::checkin::CheckinRules;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub log_level: String,
    pub admins_file: String,
    /// Reference timezone for the submission window and job schedule.
    pub utc_offset: FixedOffset,
    pub window_start: NaiveTime,
    pub window_end: NaiveTime,
    /// Accept static locations at any time of day (operational override).
    pub test_mode: bool,
    pub reminder_time: NaiveTime,
    pub last_chance_time: NaiveTime,
    pub report_time: NaiveTime,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let db_host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let db_name = env::var("DB_DATABASE").unwrap_or_else(|_| "attendance".to_string());
        let db_user = env::var("DB_USER").unwrap_or_else(|_| "attendance".to_string());
        let db_pwd = env::var("DB_PWD").unwrap_or_else(|_| "attendance".to_string());

        let database_url = format!(
            "postgres://{}:{}@{}:{}/{}",
            db_user, db_pwd, db_host, db_port, db_name
        );

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let admins_file = env::var("ADMINS_FILE").unwrap_or_else(|_| "admins.json".to_string());

        let offset_hours: i32 = env::var("UTC_OFFSET_HOURS")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .unwrap_or(3);
        let utc_offset = FixedOffset::east_opt(offset_hours * 3600)
            .context("UTC_OFFSET_HOURS is out of range")?;

        let window_start = time_var("WINDOW_START", "21:40")?;
        let window_end = time_var("WINDOW_END", "22:10")?;
        let reminder_time = time_var("REMINDER_TIME", "21:30")?;
        let last_chance_time = time_var("LAST_CHANCE_TIME", "22:05")?;
        let report_time = time_var("REPORT_TIME", "22:15")?;

        let test_mode = env::var("TEST_MODE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            log_level,
            admins_file,
            utc_offset,
            window_start,
            window_end,
            test_mode,
            reminder_time,
            last_chance_time,
            report_time,
        })
    }

    pub fn checkin_rules(&self) -> CheckinRules {
        CheckinRules {
            window_start: self.window_start,
            window_end: self.window_end,
            skip_liveness_and_window_checks: self.test_mode,
        }
    }
}

fn time_var(name: &str, default: &str) -> Result<NaiveTime> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .with_context(|| format!("{} must be HH:MM, got '{}'", name, raw))
}
