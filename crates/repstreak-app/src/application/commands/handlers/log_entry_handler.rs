use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::entry_commands::*;
use crate::application::dtos::{LogEntryDto, StatsDto};
use crate::application::services::{StatsService, UserProvisioningService};
use crate::application::utils::{parse_date_arg, parse_user_id};
use repstreak_domain::clock::Clock;
use repstreak_domain::entry::{EntryRepository, LogEntry};
use repstreak_domain::events::stats_events::EntryLogged;
use repstreak_domain::events::EventBus;
use repstreak_domain::shared::{DomainError, UserId};
use repstreak_domain::user::UserRepository;

/// Record-entry workflow: store the entry, then refresh the user's stats
pub struct LogEntryCommandHandler {
    entry_repo: Arc<dyn EntryRepository>,
    user_repo: Arc<dyn UserRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    provisioning: Arc<UserProvisioningService>,
    stats_service: Arc<StatsService>,
}

impl LogEntryCommandHandler {
    pub fn new(
        entry_repo: Arc<dyn EntryRepository>,
        user_repo: Arc<dyn UserRepository>,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
        provisioning: Arc<UserProvisioningService>,
        stats_service: Arc<StatsService>,
    ) -> Self {
        Self {
            entry_repo,
            user_repo,
            event_bus,
            clock,
            provisioning,
            stats_service,
        }
    }

    async fn ensure_user(&self, user_id: &UserId, email: Option<&str>) -> Result<(), DomainError> {
        match email {
            Some(email) => {
                self.provisioning.ensure(user_id, email, None).await?;
            }
            None => {
                if self.user_repo.find_by_id(user_id).await?.is_none() {
                    return Err(DomainError::UserNotFound(user_id.to_string()));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CommandHandler<LogEntryCommand> for LogEntryCommandHandler {
    type Result = LogEntryResult;

    async fn handle(&self, cmd: LogEntryCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling LogEntryCommand for user {}: {} push-ups",
            cmd.user_id, cmd.count
        );

        let user_id = parse_user_id(&cmd.user_id)?;

        // 1. Validate before touching storage
        let date = match cmd.date.as_deref() {
            Some(raw) => parse_date_arg(raw)?,
            None => self.clock.today(),
        };
        let entry = LogEntry::new(
            user_id.clone(),
            date,
            cmd.count,
            cmd.notes,
            self.clock.now(),
        )?;

        // 2. Profile must exist
        self.ensure_user(&user_id, cmd.email.as_deref()).await?;

        // 3. Persist entry
        self.entry_repo.save(&entry).await?;
        info!(
            "[entry] saved {} for user {} on {} (count={})",
            entry.id(),
            user_id,
            entry.date(),
            entry.count()
        );

        let event = EntryLogged {
            user_id: user_id.clone(),
            entry_id: entry.id().clone(),
            date: entry.date(),
            count: entry.count(),
            occurred_at: self.clock.now(),
        };
        // Entry is committed; a failed publish must not skip the recompute
        if let Err(e) = self.event_bus.publish(Box::new(event)).await {
            warn!("[entry] failed to publish EntryLogged for {}: {}", entry.id(), e);
        }

        // 4. Refresh stats
        let recomputed = self.stats_service.recompute(&user_id).await?;

        Ok(LogEntryResult {
            entry: LogEntryDto::from(&entry),
            stats: StatsDto::from_snapshot(&user_id, &recomputed.current),
        })
    }
}
