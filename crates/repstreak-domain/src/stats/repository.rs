use async_trait::async_trait;

use super::UserStats;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserStats>, DomainError>;

    /// Overwrite (upsert) the stats row of a user.
    async fn save(&self, stats: &UserStats) -> Result<(), DomainError>;

    /// Insert the row only when the user has none yet. Returns whether a row was written.
    async fn create_if_absent(&self, stats: &UserStats) -> Result<bool, DomainError>;
}
