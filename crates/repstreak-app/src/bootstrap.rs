use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::event_handlers::PersonalBestEventHandler;
use crate::application::queries::{EntryQueries, StatsQueries};
use crate::application::services::{StatsService, UserProvisioningService};
use crate::state::{AppState, CommandHandlers, Queries, Repositories, Runtime};
use repstreak_domain::clock::Clock;
use repstreak_domain::entry::EntryRepository;
use repstreak_domain::events::stats_events::StatsRecomputed;
use repstreak_domain::events::EventBus;
use repstreak_domain::shared::DomainError;
use repstreak_domain::stats::{StatsEngine, StatsRepository};
use repstreak_domain::user::UserRepository;
use repstreak_infrastructure::clock::SystemClock;
use repstreak_infrastructure::config::{ConfigService, StoreConfig};
use repstreak_infrastructure::events::InMemoryEventBus;
use repstreak_infrastructure::logging::init_logger;
use repstreak_infrastructure::persistence::{
    repositories::{SqliteEntryRepository, SqliteStatsRepository, SqliteUserRepository},
    Database,
};

/// Load config, start logging, open and migrate the database, then wire
/// every handler and query.
///
/// `data_dir` defaults to the platform data directory.
pub async fn build_app_state(data_dir: Option<PathBuf>) -> anyhow::Result<AppState> {
    let startup_started_at = Instant::now();

    let data_dir = match data_dir {
        Some(dir) => dir,
        None => ConfigService::default_data_dir()
            .context("Failed to resolve the platform data directory")?,
    };

    let config = Arc::new(ConfigService::load(&data_dir)?);
    init_logger(&config.log_dir(), config.log_level())?;
    info!("Data directory: {}", data_dir.display());

    let started_at = Instant::now();
    let db = Database::new(&config.database_path(), &StoreConfig::default()).await?;
    db.run_migrations().await?;
    info!(
        "✓ Database ready at {} ({}ms)",
        config.database_path().display(),
        started_at.elapsed().as_millis()
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.config().utc_offset_minutes)?);

    let state = AppState::assemble(db, config, clock).await?;

    info!(
        "✓ Application state ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );

    Ok(state)
}

impl AppState {
    /// Wire repositories, services, handlers and queries over an open,
    /// migrated database.
    pub async fn assemble(
        db: Database,
        config: Arc<ConfigService>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        let app_config = config.config();
        let pool = db.pool();

        let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
        let entry_repo: Arc<dyn EntryRepository> =
            Arc::new(SqliteEntryRepository::new(pool.clone()));
        let stats_repo: Arc<dyn StatsRepository> =
            Arc::new(SqliteStatsRepository::new(pool.clone()));

        // Initialize event bus and register event handlers
        let bus = Arc::new(InMemoryEventBus::new());
        let personal_bests = PersonalBestEventHandler::new();
        bus.subscribe_typed::<StatsRecomputed, _>(personal_bests.clone())
            .await;
        let event_bus: Arc<dyn EventBus> = bus;

        let engine = StatsEngine::new(app_config.streak_anchor);
        info!(
            "Stats engine anchor: {:?}, recompute on delete: {}",
            engine.anchor(),
            app_config.recompute_on_delete
        );

        let provisioning = Arc::new(UserProvisioningService::new(
            user_repo.clone(),
            stats_repo.clone(),
            event_bus.clone(),
            clock.clone(),
        ));
        let stats_service = Arc::new(StatsService::new(
            entry_repo.clone(),
            stats_repo.clone(),
            event_bus.clone(),
            clock.clone(),
            engine,
        ));

        let command_handlers = CommandHandlers {
            provision_user: Arc::new(ProvisionUserCommandHandler::new(provisioning.clone())),
            log_entry: Arc::new(LogEntryCommandHandler::new(
                entry_repo.clone(),
                user_repo.clone(),
                event_bus.clone(),
                clock.clone(),
                provisioning,
                stats_service.clone(),
            )),
            delete_entry: Arc::new(
                DeleteEntryCommandHandler::new(
                    entry_repo.clone(),
                    event_bus.clone(),
                    clock.clone(),
                    stats_service.clone(),
                )
                .with_recompute_on_delete(app_config.recompute_on_delete),
            ),
            recalculate_stats: Arc::new(RecalculateStatsCommandHandler::new(
                user_repo.clone(),
                stats_service,
            )),
        };

        let queries = Queries {
            entries: Arc::new(EntryQueries::new(entry_repo.clone())),
            stats: Arc::new(StatsQueries::new(
                user_repo.clone(),
                entry_repo.clone(),
                stats_repo.clone(),
                clock.clone(),
                app_config.recent_entries_limit,
            )),
        };

        Ok(Self {
            runtime: Runtime {
                pool,
                db: Arc::new(db),
                event_bus,
                clock,
            },
            repositories: Repositories {
                user: user_repo,
                entry: entry_repo,
                stats: stats_repo,
            },
            command_handlers,
            queries,
            config,
            personal_bests,
        })
    }
}
