#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use repstreak_domain::entry::LogEntry;
use repstreak_domain::shared::{EntryId, UserId};
use repstreak_domain::user::{User, UserRepository};
use repstreak_infrastructure::persistence::repositories::SqliteUserRepository;
use repstreak_infrastructure::persistence::Database;

/// Fresh in-memory database with migrations applied
pub async fn setup_in_memory_db() -> Arc<SqlitePool> {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    db.pool()
}

pub async fn insert_user(pool: &Arc<SqlitePool>, email: &str) -> UserId {
    let repo = SqliteUserRepository::new(pool.clone());
    let user = User::new(UserId::new(), email.to_string(), None, Utc::now()).expect("create user");
    repo.save(&user).await.expect("save user");
    user.id().clone()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn at(seq: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 7, 0, 0).unwrap() + Duration::seconds(seq)
}

pub fn entry(user_id: &UserId, date: NaiveDate, count: u32, seq: i64) -> LogEntry {
    LogEntry::restore(EntryId::new(), user_id.clone(), date, count, None, at(seq))
}
