use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::event_handlers::PersonalBestEventHandler;
use crate::application::queries::{EntryQueries, StatsQueries};
use repstreak_domain::clock::Clock;
use repstreak_domain::entry::EntryRepository;
use repstreak_domain::events::EventBus;
use repstreak_domain::stats::StatsRepository;
use repstreak_domain::user::UserRepository;
use repstreak_infrastructure::config::ConfigService;
use repstreak_infrastructure::persistence::Database;

/// Command handlers container
pub struct CommandHandlers {
    pub provision_user: Arc<ProvisionUserCommandHandler>,
    pub log_entry: Arc<LogEntryCommandHandler>,
    pub delete_entry: Arc<DeleteEntryCommandHandler>,
    pub recalculate_stats: Arc<RecalculateStatsCommandHandler>,
}

pub struct Runtime {
    pub pool: Arc<SqlitePool>,
    pub db: Arc<Database>,
    pub event_bus: Arc<dyn EventBus>,
    pub clock: Arc<dyn Clock>,
}

pub struct Repositories {
    pub user: Arc<dyn UserRepository>,
    pub entry: Arc<dyn EntryRepository>,
    pub stats: Arc<dyn StatsRepository>,
}

pub struct Queries {
    pub entries: Arc<EntryQueries>,
    pub stats: Arc<StatsQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub command_handlers: CommandHandlers,
    pub queries: Queries,
    pub config: Arc<ConfigService>,
    pub personal_bests: PersonalBestEventHandler,
}
