use chrono::{Datelike, NaiveDate};
use log::info;
use std::collections::HashMap;

use crate::application::dtos::{CalendarDayDto, CalendarDto, MonthStatsDto};
use crate::application::utils::format_date;
use repstreak_domain::entry::{EntryRange, EntryRepository};
use repstreak_domain::shared::{DomainError, UserId};
use repstreak_domain::stats::daily_totals;

pub(super) async fn get_calendar(
    entry_repo: &dyn EntryRepository,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<CalendarDto, DomainError> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::Validation(format!("Invalid month: {}", month)));
    }

    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::Validation(format!("Invalid year: {}", year)))?;
    let last_day = first_day
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| DomainError::Validation(format!("Invalid year: {}", year)))?;

    let entries = entry_repo
        .list_in_range(
            &UserId::from_string(user_id),
            EntryRange {
                start_date: Some(first_day),
                end_date: Some(last_day),
                limit: u32::MAX,
            },
        )
        .await?;

    let totals = daily_totals(&entries)?;
    let mut entry_counts: HashMap<NaiveDate, u32> = HashMap::new();
    for entry in &entries {
        *entry_counts.entry(entry.date()).or_insert(0) += 1;
    }

    let days: Vec<CalendarDayDto> = first_day
        .iter_days()
        .take_while(|date| *date <= last_day)
        .map(|date| {
            let total_count = totals.get(&date).copied().unwrap_or(0);
            CalendarDayDto {
                date: format_date(date),
                total_count,
                entry_count: entry_counts.get(&date).copied().unwrap_or(0),
                is_active: total_count > 0,
            }
        })
        .collect();

    let total_days = last_day.day();
    let active_days = totals.len() as u32;
    let month_stats = MonthStatsDto {
        total_days,
        active_days,
        activity_rate: (active_days as f64 / total_days as f64) * 100.0,
        total_count: totals.values().sum(),
    };

    info!(
        "[stats] calendar user_id={} month={:04}-{:02} active_days={} total={}",
        user_id, year, month, month_stats.active_days, month_stats.total_count
    );

    Ok(CalendarDto {
        user_id: user_id.to_string(),
        year,
        month,
        days,
        month_stats,
    })
}
