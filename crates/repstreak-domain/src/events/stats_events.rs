use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::shared::{EntryId, UserId};
use crate::stats::StatsSnapshot;

macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Event fired when a user profile and its zero snapshot are created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProvisioned {
    pub user_id: UserId,
    pub display_name: String,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(UserProvisioned);

/// Event fired when a push-up entry is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryLogged {
    pub user_id: UserId,
    pub entry_id: EntryId,
    pub date: NaiveDate,
    pub count: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(EntryLogged);

/// Event fired when a push-up entry is removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDeleted {
    pub user_id: UserId,
    pub entry_id: EntryId,
    pub date: NaiveDate,
    pub count: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(EntryDeleted);

/// Event fired after a snapshot has been recomputed and persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsRecomputed {
    pub user_id: UserId,
    pub previous: StatsSnapshot,
    pub current: StatsSnapshot,
    pub occurred_at: DateTime<Utc>,
}

impl StatsRecomputed {
    /// True when this recompute raised the longest streak.
    pub fn is_new_longest_streak(&self) -> bool {
        self.current.longest_streak > self.previous.longest_streak
    }

    /// True when this recompute raised the best single day.
    pub fn is_new_best_day(&self) -> bool {
        self.current.best_single_day > self.previous.best_single_day
    }
}

impl_domain_event!(StatsRecomputed);
