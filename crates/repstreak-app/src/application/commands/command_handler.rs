use async_trait::async_trait;

use repstreak_domain::shared::DomainError;

/// Marker trait for commands
pub trait Command: Send + Sync + 'static {}

/// Handles one command type
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    type Result: Send;

    async fn handle(&self, cmd: C) -> Result<Self::Result, DomainError>;
}
