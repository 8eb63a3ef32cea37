use log::debug;
use std::sync::Arc;

use crate::application::dtos::LogEntryDto;
use crate::application::utils::parse_date_arg;
use repstreak_domain::entry::{EntryRange, EntryRepository};
use repstreak_domain::shared::{DomainError, UserId};

pub const DEFAULT_LIST_LIMIT: u32 = 100;
pub const MAX_LIST_LIMIT: u32 = 1000;

pub struct EntryQueries {
    entry_repo: Arc<dyn EntryRepository>,
}

impl EntryQueries {
    pub fn new(entry_repo: Arc<dyn EntryRepository>) -> Self {
        Self { entry_repo }
    }

    /// List a user's entries, newest date first.
    ///
    /// Dates are inclusive `YYYY-MM-DD` bounds. `limit` defaults to
    /// [`DEFAULT_LIST_LIMIT`] and is capped at [`MAX_LIST_LIMIT`].
    pub async fn list_entries(
        &self,
        user_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<LogEntryDto>, DomainError> {
        let start_date = start_date.map(parse_date_arg).transpose()?;
        let end_date = end_date.map(parse_date_arg).transpose()?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(DomainError::Validation(format!(
                    "Start date {} is after end date {}",
                    start, end
                )));
            }
        }

        let limit = match limit {
            Some(0) => {
                return Err(DomainError::Validation(
                    "Limit must be at least 1".to_string(),
                ))
            }
            Some(n) => n.min(MAX_LIST_LIMIT),
            None => DEFAULT_LIST_LIMIT,
        };

        let entries = self
            .entry_repo
            .list_in_range(
                &UserId::from_string(user_id),
                EntryRange {
                    start_date,
                    end_date,
                    limit,
                },
            )
            .await?;

        debug!(
            "[entry] list user_id={} rows={} limit={}",
            user_id,
            entries.len(),
            limit
        );

        Ok(entries.iter().map(LogEntryDto::from).collect())
    }
}
