use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::user_commands::*;
use crate::application::services::UserProvisioningService;
use crate::application::utils::parse_user_id;
use repstreak_domain::shared::DomainError;

pub struct ProvisionUserCommandHandler {
    provisioning: Arc<UserProvisioningService>,
}

impl ProvisionUserCommandHandler {
    pub fn new(provisioning: Arc<UserProvisioningService>) -> Self {
        Self { provisioning }
    }
}

#[async_trait]
impl CommandHandler<ProvisionUserCommand> for ProvisionUserCommandHandler {
    type Result = ProvisionUserResult;

    async fn handle(&self, cmd: ProvisionUserCommand) -> Result<Self::Result, DomainError> {
        info!("Handling ProvisionUserCommand for user: {}", cmd.user_id);

        let user_id = parse_user_id(&cmd.user_id)?;
        let outcome = self
            .provisioning
            .ensure(&user_id, &cmd.email, cmd.display_name)
            .await?;

        Ok(ProvisionUserResult {
            user_id: outcome.user.id().to_string(),
            display_name: outcome.user.display_name().to_string(),
            created: outcome.created,
        })
    }
}
