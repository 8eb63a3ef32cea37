use std::sync::Arc;

use crate::application::dtos::{CalendarDto, DashboardDto, StatsDto};
use repstreak_domain::clock::Clock;
use repstreak_domain::entry::EntryRepository;
use repstreak_domain::shared::{DomainError, UserId};
use repstreak_domain::stats::{StatsRepository, StatsSnapshot};
use repstreak_domain::user::UserRepository;

mod calendar;
mod dashboard;

pub struct StatsQueries {
    user_repo: Arc<dyn UserRepository>,
    entry_repo: Arc<dyn EntryRepository>,
    stats_repo: Arc<dyn StatsRepository>,
    clock: Arc<dyn Clock>,
    recent_entries_limit: u32,
}

impl StatsQueries {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        entry_repo: Arc<dyn EntryRepository>,
        stats_repo: Arc<dyn StatsRepository>,
        clock: Arc<dyn Clock>,
        recent_entries_limit: u32,
    ) -> Self {
        Self {
            user_repo,
            entry_repo,
            stats_repo,
            clock,
            recent_entries_limit,
        }
    }

    /// Stored stats snapshot of a user
    pub async fn get_stats(&self, user_id: &str) -> Result<StatsDto, DomainError> {
        let user_id = UserId::from_string(user_id);
        let snapshot = self.load_snapshot(&user_id).await?;
        Ok(StatsDto::from_snapshot(&user_id, &snapshot))
    }

    /// Stats plus this week's total and the most recent entries
    pub async fn get_dashboard(&self, user_id: &str) -> Result<DashboardDto, DomainError> {
        let user_id = UserId::from_string(user_id);
        let snapshot = self.load_snapshot(&user_id).await?;

        dashboard::get_dashboard(
            self.entry_repo.as_ref(),
            &user_id,
            &snapshot,
            self.clock.today(),
            self.recent_entries_limit,
        )
        .await
    }

    /// Per-day totals for one calendar month
    pub async fn get_calendar(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<CalendarDto, DomainError> {
        calendar::get_calendar(self.entry_repo.as_ref(), user_id, year, month).await
    }

    /// A provisioned user without a stats row reads as zero stats
    async fn load_snapshot(&self, user_id: &UserId) -> Result<StatsSnapshot, DomainError> {
        if let Some(stats) = self.stats_repo.find_by_user(user_id).await? {
            return Ok(stats.into_snapshot());
        }

        match self.user_repo.find_by_id(user_id).await? {
            Some(_) => Ok(StatsSnapshot::zero()),
            None => Err(DomainError::UserNotFound(user_id.to_string())),
        }
    }
}
