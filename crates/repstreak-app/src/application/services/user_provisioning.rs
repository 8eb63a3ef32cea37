use log::{debug, info};
use std::sync::Arc;

use repstreak_domain::clock::Clock;
use repstreak_domain::events::stats_events::UserProvisioned;
use repstreak_domain::events::EventBus;
use repstreak_domain::shared::{DomainError, UserId};
use repstreak_domain::stats::{StatsRepository, StatsSnapshot, UserStats};
use repstreak_domain::user::{User, UserRepository};

#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    pub user: User,
    /// False when the profile already existed
    pub created: bool,
}

/// Makes sure a user has a profile row and a stats row
pub struct UserProvisioningService {
    user_repo: Arc<dyn UserRepository>,
    stats_repo: Arc<dyn StatsRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
}

impl UserProvisioningService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        stats_repo: Arc<dyn StatsRepository>,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            stats_repo,
            event_bus,
            clock,
        }
    }

    pub async fn ensure(
        &self,
        user_id: &UserId,
        email: &str,
        display_name: Option<String>,
    ) -> Result<ProvisionOutcome, DomainError> {
        let (user, created) = match self.user_repo.find_by_id(user_id).await? {
            Some(user) => (user, false),
            None => {
                let user = User::new(
                    user_id.clone(),
                    email.to_string(),
                    display_name,
                    self.clock.now(),
                )?;
                self.user_repo.save(&user).await?;
                (user, true)
            }
        };

        // Never replaces a row a concurrent recompute already wrote
        let seeded = self
            .stats_repo
            .create_if_absent(&UserStats::new(
                user_id.clone(),
                StatsSnapshot::zero(),
                self.clock.now(),
            ))
            .await?;
        if seeded {
            debug!("[user] seeded zero stats for {}", user_id);
        }

        if created {
            info!(
                "[user] provisioned {} ({})",
                user_id,
                user.display_name()
            );

            let event = UserProvisioned {
                user_id: user_id.clone(),
                display_name: user.display_name().to_string(),
                occurred_at: self.clock.now(),
            };
            self.event_bus.publish(Box::new(event)).await?;
        }

        Ok(ProvisionOutcome { user, created })
    }
}
