use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::entry_commands::*;
use crate::application::dtos::StatsDto;
use crate::application::services::StatsService;
use crate::application::utils::parse_user_id;
use repstreak_domain::clock::Clock;
use repstreak_domain::entry::EntryRepository;
use repstreak_domain::events::stats_events::EntryDeleted;
use repstreak_domain::events::EventBus;
use repstreak_domain::shared::{DomainError, EntryId};

pub struct DeleteEntryCommandHandler {
    entry_repo: Arc<dyn EntryRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    stats_service: Arc<StatsService>,
    recompute_on_delete: bool,
}

impl DeleteEntryCommandHandler {
    pub fn new(
        entry_repo: Arc<dyn EntryRepository>,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
        stats_service: Arc<StatsService>,
    ) -> Self {
        Self {
            entry_repo,
            event_bus,
            clock,
            stats_service,
            recompute_on_delete: false,
        }
    }

    /// Recompute stats after each delete instead of leaving them stale
    pub fn with_recompute_on_delete(mut self, enabled: bool) -> Self {
        self.recompute_on_delete = enabled;
        self
    }
}

#[async_trait]
impl CommandHandler<DeleteEntryCommand> for DeleteEntryCommandHandler {
    type Result = DeleteEntryResult;

    async fn handle(&self, cmd: DeleteEntryCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling DeleteEntryCommand for entry {} (user {})",
            cmd.entry_id, cmd.user_id
        );

        let user_id = parse_user_id(&cmd.user_id)?;
        let entry_id = EntryId::from_string(&cmd.entry_id);

        // Someone else's entry is reported the same as a missing one
        let entry = self
            .entry_repo
            .find_by_id(&entry_id)
            .await?
            .filter(|entry| entry.is_owned_by(&user_id))
            .ok_or_else(|| DomainError::EntryNotFound(cmd.entry_id.clone()))?;

        self.entry_repo.delete(&entry_id).await?;
        info!("[entry] deleted {} for user {}", entry_id, user_id);

        let event = EntryDeleted {
            user_id: user_id.clone(),
            entry_id: entry_id.clone(),
            date: entry.date(),
            count: entry.count(),
            occurred_at: self.clock.now(),
        };
        if let Err(e) = self.event_bus.publish(Box::new(event)).await {
            warn!("[entry] failed to publish EntryDeleted for {}: {}", entry_id, e);
        }

        let stats = if self.recompute_on_delete {
            let recomputed = self.stats_service.recompute(&user_id).await?;
            Some(StatsDto::from_snapshot(&user_id, &recomputed.current))
        } else {
            None
        };

        Ok(DeleteEntryResult {
            entry_id: entry_id.to_string(),
            stats_recomputed: stats.is_some(),
            stats,
        })
    }
}
