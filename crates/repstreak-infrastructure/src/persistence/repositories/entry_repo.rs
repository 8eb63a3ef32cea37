use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use super::{format_date, parse_date};
use crate::persistence::SqliteRepositoryBase;
use repstreak_domain::entry::{EntryRange, EntryRepository, LogEntry};
use repstreak_domain::shared::{DomainError, EntryId, UserId};

#[derive(FromRow)]
struct EntryRow {
    id: String,
    user_id: String,
    entry_date: String,
    count: i64,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl EntryRow {
    fn try_into_entry(self) -> Result<LogEntry, DomainError> {
        let date = parse_date(&self.entry_date, "entry_date")?;
        let count = u32::try_from(self.count).map_err(|_| {
            DomainError::DataIntegrity(format!(
                "Invalid count {} for entry {}",
                self.count, self.id
            ))
        })?;

        Ok(LogEntry::restore(
            EntryId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            date,
            count,
            self.notes,
            self.created_at,
        ))
    }
}

const SELECT_COLUMNS: &str = "id, user_id, entry_date, count, notes, created_at";

pub struct SqliteEntryRepository {
    base: SqliteRepositoryBase,
}

impl SqliteEntryRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl EntryRepository for SqliteEntryRepository {
    async fn save(&self, entry: &LogEntry) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO pushup_entries (id, user_id, entry_date, count, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(entry.id().as_str())
                    .bind(entry.user_id().as_str())
                    .bind(format_date(entry.date()))
                    .bind(i64::from(entry.count()))
                    .bind(entry.notes())
                    .bind(entry.created_at()),
                "Save entry",
            )
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &EntryId) -> Result<Option<LogEntry>, DomainError> {
        let query = format!("SELECT {} FROM pushup_entries WHERE id = ?1", SELECT_COLUMNS);

        let row: Option<EntryRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(id.as_str()),
                "Find entry by ID",
            )
            .await?;

        row.map(|r| r.try_into_entry()).transpose()
    }

    async fn delete(&self, id: &EntryId) -> Result<(), DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM pushup_entries WHERE id = ?1").bind(id.as_str()),
                "Delete entry",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EntryNotFound(id.to_string()));
        }

        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<LogEntry>, DomainError> {
        let query = format!(
            "SELECT {} FROM pushup_entries WHERE user_id = ?1 ORDER BY seq ASC",
            SELECT_COLUMNS
        );

        let rows: Vec<EntryRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query).bind(user_id.as_str()),
                "List entries by user",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_entry()).collect()
    }

    async fn list_in_range(
        &self,
        user_id: &UserId,
        range: EntryRange,
    ) -> Result<Vec<LogEntry>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM pushup_entries
            WHERE user_id = ?1
              AND (?2 IS NULL OR entry_date >= ?2)
              AND (?3 IS NULL OR entry_date <= ?3)
            ORDER BY entry_date DESC, seq DESC
            LIMIT ?4
            "#,
            SELECT_COLUMNS
        );

        let rows: Vec<EntryRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query)
                    .bind(user_id.as_str())
                    .bind(range.start_date.map(format_date))
                    .bind(range.end_date.map(format_date))
                    .bind(i64::from(range.limit)),
                "List entries in range",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_entry()).collect()
    }
}
