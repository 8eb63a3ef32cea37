use chrono::{Duration, NaiveDate};

use crate::application::dtos::{DashboardDto, LogEntryDto, StatsDto};
use crate::application::queries::MAX_LIST_LIMIT;
use crate::application::utils::format_date;
use repstreak_domain::entry::{EntryRange, EntryRepository};
use repstreak_domain::shared::{DomainError, UserId};
use repstreak_domain::stats::{daily_totals, StatsSnapshot};

const WEEK_DAYS: i64 = 7;

pub(super) async fn get_dashboard(
    entry_repo: &dyn EntryRepository,
    user_id: &UserId,
    snapshot: &StatsSnapshot,
    today: NaiveDate,
    recent_limit: u32,
) -> Result<DashboardDto, DomainError> {
    let week_start = today - Duration::days(WEEK_DAYS - 1);

    let week_entries = entry_repo
        .list_in_range(
            user_id,
            EntryRange {
                start_date: Some(week_start),
                end_date: Some(today),
                limit: u32::MAX,
            },
        )
        .await?;
    let this_week: u64 = daily_totals(&week_entries)?.values().sum();

    let recent = entry_repo
        .list_in_range(
            user_id,
            EntryRange {
                start_date: None,
                end_date: None,
                limit: recent_limit.clamp(1, MAX_LIST_LIMIT),
            },
        )
        .await?;

    Ok(DashboardDto {
        today: format_date(today),
        stats: StatsDto::from_snapshot(user_id, snapshot),
        this_week,
        recent_entries: recent.iter().map(LogEntryDto::from).collect(),
    })
}
