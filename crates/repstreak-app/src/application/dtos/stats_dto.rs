use serde::{Deserialize, Serialize};

use super::LogEntryDto;
use crate::application::utils::format_date;
use repstreak_domain::shared::UserId;
use repstreak_domain::stats::StatsSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsDto {
    pub user_id: String,
    pub total_count: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub best_single_day: u64,
    pub active_days: u32,
    pub average_per_day: f64,
    pub last_activity_date: Option<String>, // YYYY-MM-DD
}

impl StatsDto {
    pub fn from_snapshot(user_id: &UserId, snapshot: &StatsSnapshot) -> Self {
        Self {
            user_id: user_id.to_string(),
            total_count: snapshot.total_count,
            current_streak: snapshot.current_streak,
            longest_streak: snapshot.longest_streak,
            best_single_day: snapshot.best_single_day,
            active_days: snapshot.active_days,
            average_per_day: (snapshot.average_per_day * 100.0).round() / 100.0,
            last_activity_date: snapshot.last_activity_date.map(format_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDto {
    pub today: String,
    pub stats: StatsDto,
    /// Sum of counts over the seven days ending today
    pub this_week: u64,
    pub recent_entries: Vec<LogEntryDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDayDto {
    pub date: String, // YYYY-MM-DD
    pub total_count: u64,
    pub entry_count: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStatsDto {
    pub total_days: u32,
    pub active_days: u32,
    pub activity_rate: f64, // percent (0.0 - 100.0)
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDto {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDayDto>,
    pub month_stats: MonthStatsDto,
}
