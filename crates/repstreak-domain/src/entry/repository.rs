use async_trait::async_trait;
use chrono::NaiveDate;

use super::LogEntry;
use crate::shared::{DomainError, EntryId, UserId};

/// Optional date window and row cap for listing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: u32,
}

#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert a new entry.
    async fn save(&self, entry: &LogEntry) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &EntryId) -> Result<Option<LogEntry>, DomainError>;

    async fn delete(&self, id: &EntryId) -> Result<(), DomainError>;

    /// All entries of a user in insertion order (oldest first).
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<LogEntry>, DomainError>;

    /// Entries of a user within an inclusive date window, newest first.
    async fn list_in_range(
        &self,
        user_id: &UserId,
        range: EntryRange,
    ) -> Result<Vec<LogEntry>, DomainError>;
}
