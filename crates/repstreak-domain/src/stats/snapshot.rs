use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::UserId;

/// Aggregate statistics derived from a user's entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_count: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub best_single_day: u64,
    pub active_days: u32,
    pub average_per_day: f64,
    pub last_activity_date: Option<NaiveDate>,
}

impl StatsSnapshot {
    /// Zero-valued snapshot written when a user is provisioned.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// The single persisted stats row of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    user_id: UserId,
    snapshot: StatsSnapshot,
    updated_at: DateTime<Utc>,
}

impl UserStats {
    pub fn new(user_id: UserId, snapshot: StatsSnapshot, updated_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            snapshot,
            updated_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn snapshot(&self) -> &StatsSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> StatsSnapshot {
        self.snapshot
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
