use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, EntryId, UserId};

pub const MAX_NOTES_LEN: usize = 500;

/// A single logged push-up session.
///
/// Several entries may share the same `date`. Entries are never edited once
/// stored; they are only created or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    id: EntryId,
    user_id: UserId,
    date: NaiveDate,
    count: u32,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        count: u32,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if count == 0 {
            return Err(DomainError::Validation(
                "Count must be at least 1".to_string(),
            ));
        }

        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        if let Some(n) = &notes {
            if n.chars().count() > MAX_NOTES_LEN {
                return Err(DomainError::Validation(format!(
                    "Notes cannot exceed {} characters",
                    MAX_NOTES_LEN
                )));
            }
        }

        Ok(Self {
            id: EntryId::new(),
            user_id,
            date,
            count,
            notes,
            created_at,
        })
    }

    pub fn restore(
        id: EntryId,
        user_id: UserId,
        date: NaiveDate,
        count: u32,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            count,
            notes,
            created_at,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
