mod entry_repo;
mod stats_repo;
mod user_repo;

pub use entry_repo::SqliteEntryRepository;
pub use stats_repo::SqliteStatsRepository;
pub use user_repo::SqliteUserRepository;

use chrono::NaiveDate;
use repstreak_domain::shared::DomainError;

use crate::persistence::DATE_FORMAT;

fn parse_date(value: &str, column: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        DomainError::DataIntegrity(format!("Invalid {}: {} ({})", column, value, e))
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
