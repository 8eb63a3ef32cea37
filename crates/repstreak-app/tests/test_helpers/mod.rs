#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::path::Path;
use std::sync::Arc;

use repstreak_domain::clock::{Clock, FixedClock};
use repstreak_infrastructure::config::{AppConfig, ConfigService, CONFIG_FILE_NAME};
use repstreak_infrastructure::persistence::Database;
use repstreak_lib::application::commands::entry_commands::LogEntryCommand;
use repstreak_lib::AppState;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

pub fn days_ago(n: i64) -> NaiveDate {
    today() - Duration::days(n)
}

pub fn write_config(data_dir: &Path, config: &AppConfig) {
    let content = serde_json::to_string_pretty(config).expect("serialize config");
    std::fs::write(data_dir.join(CONFIG_FILE_NAME), content).expect("write config");
}

/// App state over an in-memory database with the clock pinned to [`today`]
pub async fn setup_app(data_dir: &Path, config: AppConfig) -> AppState {
    write_config(data_dir, &config);
    let config = Arc::new(ConfigService::load(data_dir).expect("load config"));

    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");

    let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(today()));
    AppState::assemble(db, config, clock)
        .await
        .expect("assemble app state")
}

pub fn log_cmd(user_id: &str, count: u32, date: NaiveDate) -> LogEntryCommand {
    LogEntryCommand {
        user_id: user_id.to_string(),
        email: Some(format!("{}@example.com", user_id)),
        count,
        date: Some(date.format("%Y-%m-%d").to_string()),
        notes: None,
    }
}
