use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::StatsSnapshot;
use crate::entry::LogEntry;
use crate::shared::DomainError;

/// Which day a current streak may start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakAnchor {
    /// Start at today, or at yesterday when nothing is logged today yet.
    /// A streak survives until one full day passes without activity.
    #[default]
    TodayOrYesterday,
    /// Start at today only; an empty today means no current streak.
    TodayOnly,
}

/// Derives a user's aggregate statistics from their entries.
///
/// Pure: no I/O and no wall-clock reads. The same inputs always yield the
/// same snapshot, so callers may retry a failed save and recompute again.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsEngine {
    anchor: StreakAnchor,
}

impl StatsEngine {
    pub fn new(anchor: StreakAnchor) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> StreakAnchor {
        self.anchor
    }

    /// Compute a new snapshot.
    ///
    /// `existing` only seeds floors: `longest_streak` and `best_single_day`
    /// never drop below their previous values. `entries` must be in insertion
    /// order; the last of the most recently created entries sets
    /// `last_activity_date`.
    pub fn recompute(
        &self,
        existing: &StatsSnapshot,
        entries: &[LogEntry],
        today: NaiveDate,
    ) -> Result<StatsSnapshot, DomainError> {
        let daily = daily_totals(entries)?;

        let total_count = daily
            .values()
            .try_fold(0u64, |acc, day| acc.checked_add(*day))
            .ok_or_else(|| DomainError::DataIntegrity("Total count overflow".to_string()))?;

        let best_day = daily.values().copied().max().unwrap_or(0);
        let best_single_day = best_day.max(existing.best_single_day);

        let current = current_streak(&daily, today, self.anchor);
        let longest_streak = current.max(existing.longest_streak);

        let active_days = u32::try_from(daily.len()).map_err(|_| {
            DomainError::DataIntegrity(format!("Too many active days: {}", daily.len()))
        })?;

        let average_per_day = if active_days == 0 {
            0.0
        } else {
            total_count as f64 / active_days as f64
        };

        let last_activity_date = entries
            .iter()
            .enumerate()
            .max_by_key(|(position, entry)| (entry.created_at(), *position))
            .map(|(_, entry)| entry.date());

        Ok(StatsSnapshot {
            total_count,
            current_streak: current,
            longest_streak,
            best_single_day,
            active_days,
            average_per_day,
            last_activity_date,
        })
    }
}

/// Sum entry counts per calendar date.
///
/// Fails on a zero count rather than producing a snapshot from bad input.
pub fn daily_totals(entries: &[LogEntry]) -> Result<BTreeMap<NaiveDate, u64>, DomainError> {
    let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for entry in entries {
        if entry.count() == 0 {
            return Err(DomainError::Validation(format!(
                "Entry {} has a zero count",
                entry.id()
            )));
        }

        let day = daily.entry(entry.date()).or_insert(0);
        *day = day.checked_add(u64::from(entry.count())).ok_or_else(|| {
            DomainError::DataIntegrity(format!("Daily total overflow on {}", entry.date()))
        })?;
    }

    Ok(daily)
}

/// Count consecutive active days walking backward from the anchor day.
///
/// The walk stops at the first day without activity. Days after `today`
/// never contribute.
pub fn current_streak(
    daily: &BTreeMap<NaiveDate, u64>,
    today: NaiveDate,
    anchor: StreakAnchor,
) -> u32 {
    let start = if daily.contains_key(&today) {
        today
    } else {
        match (anchor, today.pred_opt()) {
            (StreakAnchor::TodayOrYesterday, Some(yesterday)) if daily.contains_key(&yesterday) => {
                yesterday
            }
            _ => return 0,
        }
    };

    let mut streak = 0u32;
    let mut day = Some(start);

    while let Some(current) = day {
        if !daily.contains_key(&current) {
            break;
        }
        streak += 1;
        day = current.pred_opt();
    }

    streak
}
