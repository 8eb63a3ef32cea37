use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use super::{format_date, parse_date};
use crate::persistence::SqliteRepositoryBase;
use repstreak_domain::shared::{DomainError, UserId};
use repstreak_domain::stats::{StatsRepository, StatsSnapshot, UserStats};

#[derive(FromRow)]
struct UserStatsRow {
    user_id: String,
    total_count: i64,
    current_streak: i64,
    longest_streak: i64,
    best_single_day: i64,
    active_days: i64,
    average_per_day: f64,
    last_activity_date: Option<String>,
    updated_at: DateTime<Utc>,
}

impl UserStatsRow {
    fn try_into_stats(self) -> Result<UserStats, DomainError> {
        let snapshot = StatsSnapshot {
            total_count: to_unsigned(self.total_count, "total_count")?,
            current_streak: to_u32(self.current_streak, "current_streak")?,
            longest_streak: to_u32(self.longest_streak, "longest_streak")?,
            best_single_day: to_unsigned(self.best_single_day, "best_single_day")?,
            active_days: to_u32(self.active_days, "active_days")?,
            average_per_day: self.average_per_day,
            last_activity_date: self
                .last_activity_date
                .as_deref()
                .map(|d| parse_date(d, "last_activity_date"))
                .transpose()?,
        };

        Ok(UserStats::new(
            UserId::from_string(&self.user_id),
            snapshot,
            self.updated_at,
        ))
    }
}

fn to_unsigned(value: i64, column: &str) -> Result<u64, DomainError> {
    u64::try_from(value)
        .map_err(|_| DomainError::DataIntegrity(format!("Negative {}: {}", column, value)))
}

fn to_u32(value: i64, column: &str) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::DataIntegrity(format!("Invalid {}: {}", column, value)))
}

fn to_signed(value: u64, column: &str) -> Result<i64, DomainError> {
    i64::try_from(value)
        .map_err(|_| DomainError::DataIntegrity(format!("{} too large: {}", column, value)))
}

pub struct SqliteStatsRepository {
    base: SqliteRepositoryBase,
}

impl SqliteStatsRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl StatsRepository for SqliteStatsRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserStats>, DomainError> {
        let query = r#"
            SELECT
                user_id,
                total_count,
                current_streak,
                longest_streak,
                best_single_day,
                active_days,
                average_per_day,
                last_activity_date,
                updated_at
            FROM user_stats
            WHERE user_id = ?1
        "#;

        let row: Option<UserStatsRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query).bind(user_id.as_str()),
                "Find stats by user",
            )
            .await?;

        row.map(|r| r.try_into_stats()).transpose()
    }

    async fn save(&self, stats: &UserStats) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO user_stats (
                user_id,
                total_count,
                current_streak,
                longest_streak,
                best_single_day,
                active_days,
                average_per_day,
                last_activity_date,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(user_id) DO UPDATE SET
                total_count = ?2,
                current_streak = ?3,
                longest_streak = ?4,
                best_single_day = ?5,
                active_days = ?6,
                average_per_day = ?7,
                last_activity_date = ?8,
                updated_at = ?9
        "#;

        let snapshot = stats.snapshot();

        self.base
            .execute(
                sqlx::query(query)
                    .bind(stats.user_id().as_str())
                    .bind(to_signed(snapshot.total_count, "total_count")?)
                    .bind(i64::from(snapshot.current_streak))
                    .bind(i64::from(snapshot.longest_streak))
                    .bind(to_signed(snapshot.best_single_day, "best_single_day")?)
                    .bind(i64::from(snapshot.active_days))
                    .bind(snapshot.average_per_day)
                    .bind(snapshot.last_activity_date.map(format_date))
                    .bind(stats.updated_at()),
                "Save user stats",
            )
            .await?;

        Ok(())
    }

    async fn create_if_absent(&self, stats: &UserStats) -> Result<bool, DomainError> {
        let query = r#"
            INSERT INTO user_stats (
                user_id,
                total_count,
                current_streak,
                longest_streak,
                best_single_day,
                active_days,
                average_per_day,
                last_activity_date,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(user_id) DO NOTHING
        "#;

        let snapshot = stats.snapshot();

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(stats.user_id().as_str())
                    .bind(to_signed(snapshot.total_count, "total_count")?)
                    .bind(i64::from(snapshot.current_streak))
                    .bind(i64::from(snapshot.longest_streak))
                    .bind(to_signed(snapshot.best_single_day, "best_single_day")?)
                    .bind(i64::from(snapshot.active_days))
                    .bind(snapshot.average_per_day)
                    .bind(snapshot.last_activity_date.map(format_date))
                    .bind(stats.updated_at()),
                "Create user stats",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
