use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::entry_commands::*;
use crate::application::dtos::StatsDto;
use crate::application::services::StatsService;
use crate::application::utils::parse_user_id;
use repstreak_domain::shared::DomainError;
use repstreak_domain::user::UserRepository;

pub struct RecalculateStatsCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    stats_service: Arc<StatsService>,
}

impl RecalculateStatsCommandHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>, stats_service: Arc<StatsService>) -> Self {
        Self {
            user_repo,
            stats_service,
        }
    }
}

#[async_trait]
impl CommandHandler<RecalculateStatsCommand> for RecalculateStatsCommandHandler {
    type Result = RecalculateStatsResult;

    async fn handle(&self, cmd: RecalculateStatsCommand) -> Result<Self::Result, DomainError> {
        info!("Handling RecalculateStatsCommand for user: {}", cmd.user_id);

        let user_id = parse_user_id(&cmd.user_id)?;
        if self.user_repo.find_by_id(&user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(cmd.user_id));
        }

        let recomputed = self.stats_service.recompute(&user_id).await?;

        Ok(RecalculateStatsResult {
            stats: StatsDto::from_snapshot(&user_id, &recomputed.current),
        })
    }
}
