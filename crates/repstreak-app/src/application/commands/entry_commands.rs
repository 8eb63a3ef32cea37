use serde::{Deserialize, Serialize};

use super::Command;
use crate::application::dtos::{LogEntryDto, StatsDto};

/// Log push-ups for a user and refresh their stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntryCommand {
    pub user_id: String,
    /// Used to provision the profile on a user's first entry
    pub email: Option<String>,
    pub count: u32,
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
    pub notes: Option<String>,
}

impl Command for LogEntryCommand {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntryResult {
    pub entry: LogEntryDto,
    pub stats: StatsDto,
}

/// Remove one entry owned by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEntryCommand {
    pub user_id: String,
    pub entry_id: String,
}

impl Command for DeleteEntryCommand {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEntryResult {
    pub entry_id: String,
    pub stats_recomputed: bool,
    /// Present only when stats were recomputed
    pub stats: Option<StatsDto>,
}

/// Rebuild a user's stats from their stored entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculateStatsCommand {
    pub user_id: String,
}

impl Command for RecalculateStatsCommand {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculateStatsResult {
    pub stats: StatsDto,
}
