use log::{debug, info, warn};
use std::sync::Arc;

use super::UserLocks;
use repstreak_domain::clock::Clock;
use repstreak_domain::entry::EntryRepository;
use repstreak_domain::events::stats_events::StatsRecomputed;
use repstreak_domain::events::EventBus;
use repstreak_domain::shared::{DomainError, UserId};
use repstreak_domain::stats::{StatsEngine, StatsRepository, StatsSnapshot, UserStats};

/// Snapshot before and after a recompute
#[derive(Debug, Clone, PartialEq)]
pub struct Recomputed {
    pub previous: StatsSnapshot,
    pub current: StatsSnapshot,
}

/// Loads a user's entries, runs the stats engine and persists the result.
///
/// Recomputes of the same user are serialized through [`UserLocks`], so the
/// stored snapshot always reflects an entry list at least as new as the one
/// any earlier recompute saw.
pub struct StatsService {
    entry_repo: Arc<dyn EntryRepository>,
    stats_repo: Arc<dyn StatsRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    engine: StatsEngine,
    locks: UserLocks,
}

impl StatsService {
    pub fn new(
        entry_repo: Arc<dyn EntryRepository>,
        stats_repo: Arc<dyn StatsRepository>,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
        engine: StatsEngine,
    ) -> Self {
        Self {
            entry_repo,
            stats_repo,
            event_bus,
            clock,
            engine,
            locks: UserLocks::new(),
        }
    }

    pub async fn recompute(&self, user_id: &UserId) -> Result<Recomputed, DomainError> {
        let _guard = self.locks.acquire(user_id).await;

        let entries = self.entry_repo.list_by_user(user_id).await?;
        let previous = self
            .stats_repo
            .find_by_user(user_id)
            .await?
            .map(UserStats::into_snapshot)
            .unwrap_or_default();

        let today = self.clock.today();
        let current = self.engine.recompute(&previous, &entries, today)?;

        debug!(
            "[stats] user {} recomputed from {} entries (today = {})",
            user_id,
            entries.len(),
            today
        );

        self.stats_repo
            .save(&UserStats::new(
                user_id.clone(),
                current.clone(),
                self.clock.now(),
            ))
            .await?;

        info!(
            "[stats] user {}: total={}, streak={}, longest={}, best_day={}",
            user_id,
            current.total_count,
            current.current_streak,
            current.longest_streak,
            current.best_single_day
        );

        let event = StatsRecomputed {
            user_id: user_id.clone(),
            previous: previous.clone(),
            current: current.clone(),
            occurred_at: self.clock.now(),
        };
        if let Err(e) = self.event_bus.publish(Box::new(event)).await {
            warn!("[stats] failed to publish StatsRecomputed for {}: {}", user_id, e);
        }

        Ok(Recomputed { previous, current })
    }
}
