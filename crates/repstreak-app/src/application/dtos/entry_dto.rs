use serde::{Deserialize, Serialize};

use crate::application::utils::format_date;
use repstreak_domain::entry::LogEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntryDto {
    pub id: String,
    pub user_id: String,
    pub date: String, // YYYY-MM-DD
    pub count: u32,
    pub notes: Option<String>,
    pub created_at: String, // RFC 3339
}

impl From<&LogEntry> for LogEntryDto {
    fn from(entry: &LogEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            user_id: entry.user_id().to_string(),
            date: format_date(entry.date()),
            count: entry.count(),
            notes: entry.notes().map(str::to_string),
            created_at: entry.created_at().to_rfc3339(),
        }
    }
}
