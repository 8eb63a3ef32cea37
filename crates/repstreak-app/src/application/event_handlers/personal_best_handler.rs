use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use tokio::sync::RwLock;

use repstreak_domain::events::stats_events::StatsRecomputed;
use repstreak_domain::events::EventHandler;
use repstreak_domain::shared::DomainError;

const MAX_RECENT: usize = 50;

/// Kind of record a recompute can set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalBest {
    LongestStreak(u32),
    BestSingleDay(u64),
}

/// Logs new personal records and keeps the most recent ones per process
#[derive(Clone, Default)]
pub struct PersonalBestEventHandler {
    recent: Arc<RwLock<Vec<(String, PersonalBest)>>>,
}

impl PersonalBestEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records seen so far, oldest first, as `(user_id, record)`
    pub async fn recent(&self) -> Vec<(String, PersonalBest)> {
        self.recent.read().await.clone()
    }
}

#[async_trait]
impl EventHandler<StatsRecomputed> for PersonalBestEventHandler {
    async fn handle(&self, event: &StatsRecomputed) -> Result<(), DomainError> {
        let mut records = Vec::new();

        if event.is_new_longest_streak() {
            info!(
                "[stats] user {} reached a new longest streak: {} days",
                event.user_id, event.current.longest_streak
            );
            records.push(PersonalBest::LongestStreak(event.current.longest_streak));
        }

        if event.is_new_best_day() {
            info!(
                "[stats] user {} set a new best day: {} push-ups",
                event.user_id, event.current.best_single_day
            );
            records.push(PersonalBest::BestSingleDay(event.current.best_single_day));
        }

        if !records.is_empty() {
            let mut recent = self.recent.write().await;
            recent.extend(
                records
                    .into_iter()
                    .map(|record| (event.user_id.to_string(), record)),
            );
            let overflow = recent.len().saturating_sub(MAX_RECENT);
            recent.drain(..overflow);
        }

        Ok(())
    }
}
