use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::entry_commands::*;
use crate::application::commands::handlers::*;
use crate::application::commands::user_commands::*;
use crate::application::services::{StatsService, UserProvisioningService};
use repstreak_domain::clock::{Clock, FixedClock};
use repstreak_domain::entry::{EntryRange, EntryRepository, LogEntry};
use repstreak_domain::events::{DomainEvent, EventBus};
use repstreak_domain::shared::{DomainError, EntryId, UserId};
use repstreak_domain::stats::{StatsEngine, StatsRepository, StatsSnapshot, UserStats};
use repstreak_domain::user::{User, UserRepository};

// Mock repositories and services for testing

struct MockEntryRepository {
    entries: tokio::sync::RwLock<Vec<LogEntry>>,
}

impl MockEntryRepository {
    fn new() -> Self {
        Self {
            entries: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait::async_trait]
impl EntryRepository for MockEntryRepository {
    async fn save(&self, entry: &LogEntry) -> Result<(), DomainError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EntryId) -> Result<Option<LogEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|e| e.id() == id).cloned())
    }

    async fn delete(&self, id: &EntryId) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id() != id);
        if entries.len() == before {
            return Err(DomainError::EntryNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<LogEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.is_owned_by(user_id))
            .cloned()
            .collect())
    }

    async fn list_in_range(
        &self,
        user_id: &UserId,
        range: EntryRange,
    ) -> Result<Vec<LogEntry>, DomainError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<LogEntry> = entries
            .iter()
            .rev()
            .filter(|e| e.is_owned_by(user_id))
            .filter(|e| range.start_date.map_or(true, |start| e.date() >= start))
            .filter(|e| range.end_date.map_or(true, |end| e.date() <= end))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date().cmp(&a.date()));
        matching.truncate(range.limit as usize);
        Ok(matching)
    }
}

struct MockStatsRepository {
    stats: tokio::sync::RwLock<HashMap<String, UserStats>>,
}

impl MockStatsRepository {
    fn new() -> Self {
        Self {
            stats: tokio::sync::RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl StatsRepository for MockStatsRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserStats>, DomainError> {
        let stats = self.stats.read().await;
        Ok(stats.get(user_id.as_str()).cloned())
    }

    async fn save(&self, stats: &UserStats) -> Result<(), DomainError> {
        let mut rows = self.stats.write().await;
        rows.insert(stats.user_id().as_str().to_string(), stats.clone());
        Ok(())
    }

    async fn create_if_absent(&self, stats: &UserStats) -> Result<bool, DomainError> {
        let mut rows = self.stats.write().await;
        if rows.contains_key(stats.user_id().as_str()) {
            return Ok(false);
        }
        rows.insert(stats.user_id().as_str().to_string(), stats.clone());
        Ok(true)
    }
}

/// Holds `create_if_absent` until released, so a recompute can land first
struct GatedStatsRepository {
    inner: MockStatsRepository,
    reached: tokio::sync::Notify,
    release: tokio::sync::Notify,
}

impl GatedStatsRepository {
    fn new() -> Self {
        Self {
            inner: MockStatsRepository::new(),
            reached: tokio::sync::Notify::new(),
            release: tokio::sync::Notify::new(),
        }
    }
}

#[async_trait::async_trait]
impl StatsRepository for GatedStatsRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserStats>, DomainError> {
        self.inner.find_by_user(user_id).await
    }

    async fn save(&self, stats: &UserStats) -> Result<(), DomainError> {
        self.inner.save(stats).await
    }

    async fn create_if_absent(&self, stats: &UserStats) -> Result<bool, DomainError> {
        self.reached.notify_one();
        self.release.notified().await;
        self.inner.create_if_absent(stats).await
    }
}

struct MockUserRepository {
    users: tokio::sync::RwLock<HashMap<String, User>>,
}

impl MockUserRepository {
    fn new() -> Self {
        Self {
            users: tokio::sync::RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for MockUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        users.insert(user.id().as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }
}

struct MockEventBus {
    events: tokio::sync::RwLock<Vec<&'static str>>,
    fail_on: Option<&'static str>,
}

impl MockEventBus {
    fn new() -> Self {
        Self {
            events: tokio::sync::RwLock::new(Vec::new()),
            fail_on: None,
        }
    }

    /// Rejects every event whose short type name is `name`
    fn failing_on(name: &'static str) -> Self {
        Self {
            fail_on: Some(name),
            ..Self::new()
        }
    }

    async fn published(&self) -> Vec<&'static str> {
        self.events
            .read()
            .await
            .iter()
            .map(|&name| name.rsplit("::").next().unwrap_or(name))
            .collect()
    }
}

#[async_trait::async_trait]
impl EventBus for MockEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let type_name = event.event_type_name();
        if self.fail_on.is_some_and(|name| type_name.ends_with(name)) {
            return Err(DomainError::Infrastructure(format!(
                "bus unavailable for {}",
                type_name
            )));
        }
        self.events.write().await.push(type_name);
        Ok(())
    }
}

mockall::mock! {
    StatsRepo {}

    #[async_trait::async_trait]
    impl StatsRepository for StatsRepo {
        async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserStats>, DomainError>;
        async fn save(&self, stats: &UserStats) -> Result<(), DomainError>;
        async fn create_if_absent(&self, stats: &UserStats) -> Result<bool, DomainError>;
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

struct Harness {
    entry_repo: Arc<MockEntryRepository>,
    stats_repo: Arc<dyn StatsRepository>,
    user_repo: Arc<MockUserRepository>,
    event_bus: Arc<MockEventBus>,
    clock: Arc<dyn Clock>,
    provisioning: Arc<UserProvisioningService>,
    stats_service: Arc<StatsService>,
}

impl Harness {
    fn new() -> Self {
        Self::with_stats_repo(Arc::new(MockStatsRepository::new()))
    }

    fn with_stats_repo(stats_repo: Arc<dyn StatsRepository>) -> Self {
        Self::with_parts(stats_repo, MockEventBus::new())
    }

    fn with_event_bus(event_bus: MockEventBus) -> Self {
        Self::with_parts(Arc::new(MockStatsRepository::new()), event_bus)
    }

    fn with_parts(stats_repo: Arc<dyn StatsRepository>, event_bus: MockEventBus) -> Self {
        let entry_repo = Arc::new(MockEntryRepository::new());
        let user_repo = Arc::new(MockUserRepository::new());
        let event_bus = Arc::new(event_bus);
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(today()));

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
            StatsEngine::default(),
        ));

        Self {
            entry_repo,
            stats_repo,
            user_repo,
            event_bus,
            clock,
            provisioning,
            stats_service,
        }
    }

    fn provision_handler(&self) -> ProvisionUserCommandHandler {
        ProvisionUserCommandHandler::new(self.provisioning.clone())
    }

    fn log_handler(&self) -> LogEntryCommandHandler {
        LogEntryCommandHandler::new(
            self.entry_repo.clone(),
            self.user_repo.clone(),
            self.event_bus.clone(),
            self.clock.clone(),
            self.provisioning.clone(),
            self.stats_service.clone(),
        )
    }

    fn delete_handler(&self, recompute_on_delete: bool) -> DeleteEntryCommandHandler {
        DeleteEntryCommandHandler::new(
            self.entry_repo.clone(),
            self.event_bus.clone(),
            self.clock.clone(),
            self.stats_service.clone(),
        )
        .with_recompute_on_delete(recompute_on_delete)
    }

    fn recalculate_handler(&self) -> RecalculateStatsCommandHandler {
        RecalculateStatsCommandHandler::new(self.user_repo.clone(), self.stats_service.clone())
    }

    async fn save_user(&self, user_id: &str) {
        self.user_repo
            .save(&User::restore(
                UserId::from_string(user_id),
                format!("{}@example.com", user_id),
                user_id.to_string(),
                self.clock.now(),
            ))
            .await
            .unwrap();
    }

    async fn snapshot(&self, user_id: &str) -> Option<StatsSnapshot> {
        self.stats_repo
            .find_by_user(&UserId::from_string(user_id))
            .await
            .unwrap()
            .map(UserStats::into_snapshot)
    }
}

fn log_cmd(user_id: &str, count: u32, date: Option<NaiveDate>) -> LogEntryCommand {
    LogEntryCommand {
        user_id: user_id.to_string(),
        email: Some(format!("{}@example.com", user_id)),
        count,
        date: date.map(|d| d.format("%Y-%m-%d").to_string()),
        notes: None,
    }
}

// Tests

#[tokio::test]
async fn test_provision_user_creates_profile_and_zero_stats() {
    let h = Harness::new();
    let handler = h.provision_handler();

    let result = handler
        .handle(ProvisionUserCommand {
            user_id: "u1".to_string(),
            email: "jordan@example.com".to_string(),
            display_name: None,
        })
        .await
        .unwrap();

    assert!(result.created);
    assert_eq!(result.display_name, "jordan");
    assert_eq!(h.snapshot("u1").await, Some(StatsSnapshot::zero()));
    assert_eq!(h.event_bus.published().await, vec!["UserProvisioned"]);
}

#[tokio::test]
async fn test_provision_user_is_idempotent() {
    let h = Harness::new();
    let handler = h.provision_handler();
    let cmd = ProvisionUserCommand {
        user_id: "u1".to_string(),
        email: "jordan@example.com".to_string(),
        display_name: Some("Jordan".to_string()),
    };

    handler.handle(cmd.clone()).await.unwrap();
    let second = handler.handle(cmd).await.unwrap();

    assert!(!second.created);
    assert_eq!(second.display_name, "Jordan");
    assert_eq!(h.event_bus.published().await.len(), 1);
}

#[tokio::test]
async fn test_log_entry_provisions_and_recomputes() {
    let h = Harness::new();
    let handler = h.log_handler();

    let result = handler.handle(log_cmd("u1", 25, None)).await.unwrap();

    assert_eq!(result.entry.count, 25);
    assert_eq!(result.entry.date, "2026-10-18");
    assert_eq!(result.stats.total_count, 25);
    assert_eq!(result.stats.current_streak, 1);
    assert_eq!(result.stats.last_activity_date.as_deref(), Some("2026-10-18"));

    let stored = h.snapshot("u1").await.unwrap();
    assert_eq!(stored.total_count, 25);

    assert_eq!(
        h.event_bus.published().await,
        vec!["UserProvisioned", "EntryLogged", "StatsRecomputed"]
    );
}

#[tokio::test]
async fn test_log_entry_builds_streak_over_consecutive_days() {
    let h = Harness::new();
    let handler = h.log_handler();

    for (offset, count) in [(2, 20), (1, 25), (0, 30)] {
        handler
            .handle(log_cmd("u1", count, Some(today() - Duration::days(offset))))
            .await
            .unwrap();
    }

    let stats = h.snapshot("u1").await.unwrap();
    assert_eq!(stats.total_count, 75);
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.longest_streak, 3);
    assert_eq!(stats.best_single_day, 30);
}

#[tokio::test]
async fn test_log_entry_unknown_user_without_email_fails() {
    let h = Harness::new();
    let handler = h.log_handler();

    let cmd = LogEntryCommand {
        email: None,
        ..log_cmd("ghost", 10, None)
    };
    let result = handler.handle(cmd).await;

    assert!(matches!(result, Err(DomainError::UserNotFound(_))));
    assert_eq!(h.entry_repo.len().await, 0);
}

#[tokio::test]
async fn test_log_entry_rejects_zero_count() {
    let h = Harness::new();
    let handler = h.log_handler();

    let result = handler.handle(log_cmd("u1", 0, None)).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(h.entry_repo.len().await, 0);
    assert!(h.event_bus.published().await.is_empty());
}

#[tokio::test]
async fn test_log_entry_rejects_bad_date() {
    let h = Harness::new();
    let handler = h.log_handler();

    let cmd = LogEntryCommand {
        date: Some("18.10.2026".to_string()),
        ..log_cmd("u1", 10, None)
    };
    let result = handler.handle(cmd).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(h.entry_repo.len().await, 0);
}

#[tokio::test]
async fn test_log_entry_propagates_stats_save_failure() {
    let mut stats_repo = MockStatsRepo::new();
    stats_repo.expect_find_by_user().returning(|_| Ok(None));
    stats_repo
        .expect_save()
        .returning(|_| Err(DomainError::Repository("disk full".to_string())));

    let h = Harness::with_stats_repo(Arc::new(stats_repo));
    h.save_user("u1").await;

    let cmd = LogEntryCommand {
        email: None,
        ..log_cmd("u1", 10, None)
    };
    let result = h.log_handler().handle(cmd).await;

    assert!(matches!(result, Err(DomainError::Repository(_))));
    // The entry itself is kept; a later recompute repairs the snapshot.
    assert_eq!(h.entry_repo.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_logs_for_one_user_keep_all_counts() {
    let h = Harness::new();
    let handler = Arc::new(h.log_handler());

    h.provision_handler()
        .handle(ProvisionUserCommand {
            user_id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            display_name: None,
        })
        .await
        .unwrap();

    let tasks: Vec<_> = (1..=10)
        .map(|count| {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(log_cmd("u1", count, None)).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stats = h.snapshot("u1").await.unwrap();
    assert_eq!(stats.total_count, 55);
    assert_eq!(stats.best_single_day, 55);
}

#[tokio::test]
async fn test_delete_entry_of_other_user_is_not_found() {
    let h = Harness::new();
    let logged = h.log_handler().handle(log_cmd("u1", 10, None)).await.unwrap();

    let result = h
        .delete_handler(false)
        .handle(DeleteEntryCommand {
            user_id: "u2".to_string(),
            entry_id: logged.entry.id,
        })
        .await;

    assert!(matches!(result, Err(DomainError::EntryNotFound(_))));
    assert_eq!(h.entry_repo.len().await, 1);
}

#[tokio::test]
async fn test_delete_entry_leaves_stats_by_default() {
    let h = Harness::new();
    let logged = h.log_handler().handle(log_cmd("u1", 10, None)).await.unwrap();

    let result = h
        .delete_handler(false)
        .handle(DeleteEntryCommand {
            user_id: "u1".to_string(),
            entry_id: logged.entry.id,
        })
        .await
        .unwrap();

    assert!(!result.stats_recomputed);
    assert!(result.stats.is_none());
    assert_eq!(h.entry_repo.len().await, 0);
    assert_eq!(h.snapshot("u1").await.unwrap().total_count, 10);
    assert_eq!(
        h.event_bus.published().await.last().copied(),
        Some("EntryDeleted")
    );
}

#[tokio::test]
async fn test_delete_entry_with_recompute_keeps_floors() {
    let h = Harness::new();
    let log = h.log_handler();
    log.handle(log_cmd("u1", 10, Some(today() - Duration::days(1))))
        .await
        .unwrap();
    let big = log.handle(log_cmd("u1", 50, None)).await.unwrap();

    let result = h
        .delete_handler(true)
        .handle(DeleteEntryCommand {
            user_id: "u1".to_string(),
            entry_id: big.entry.id,
        })
        .await
        .unwrap();

    let stats = result.stats.unwrap();
    assert!(result.stats_recomputed);
    assert_eq!(stats.total_count, 10);
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.best_single_day, 50);
}

#[tokio::test]
async fn test_recalculate_stats_rebuilds_snapshot() {
    let h = Harness::new();
    h.log_handler().handle(log_cmd("u1", 15, None)).await.unwrap();

    // Simulate a stale row left by a delete without recompute
    h.stats_repo
        .save(&UserStats::new(
            UserId::from_string("u1"),
            StatsSnapshot::zero(),
            h.clock.now(),
        ))
        .await
        .unwrap();

    let result = h
        .recalculate_handler()
        .handle(RecalculateStatsCommand {
            user_id: "u1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.stats.total_count, 15);
    assert_eq!(h.snapshot("u1").await.unwrap().total_count, 15);
}

#[tokio::test]
async fn test_recalculate_stats_unknown_user() {
    let h = Harness::new();

    let result = h
        .recalculate_handler()
        .handle(RecalculateStatsCommand {
            user_id: "ghost".to_string(),
        })
        .await;

    assert!(matches!(result, Err(DomainError::UserNotFound(_))));
}

#[tokio::test]
async fn test_provision_does_not_reset_stats_recomputed_meanwhile() {
    let gated = Arc::new(GatedStatsRepository::new());
    let h = Harness::with_stats_repo(gated.clone());
    h.save_user("u1").await;

    let provision = h.provision_handler();
    let pending = tokio::spawn(async move {
        provision
            .handle(ProvisionUserCommand {
                user_id: "u1".to_string(),
                email: "u1@example.com".to_string(),
                display_name: None,
            })
            .await
    });

    // Provisioning is parked right before seeding the stats row
    gated.reached.notified().await;

    let cmd = LogEntryCommand {
        email: None,
        ..log_cmd("u1", 40, None)
    };
    let logged = h.log_handler().handle(cmd).await.unwrap();
    assert_eq!(logged.stats.total_count, 40);

    gated.release.notify_one();
    let outcome = pending.await.unwrap().unwrap();
    assert!(!outcome.created);

    let stored = h.snapshot("u1").await.unwrap();
    assert_eq!(stored.total_count, 40);
    assert_eq!(stored.current_streak, 1);
}

#[tokio::test]
async fn test_log_entry_recomputes_when_publish_fails() {
    let h = Harness::with_event_bus(MockEventBus::failing_on("EntryLogged"));

    let result = h.log_handler().handle(log_cmd("u1", 30, None)).await.unwrap();

    assert_eq!(result.stats.total_count, 30);
    assert_eq!(h.entry_repo.len().await, 1);
    assert_eq!(h.snapshot("u1").await.unwrap().total_count, 30);
    assert_eq!(
        h.event_bus.published().await,
        vec!["UserProvisioned", "StatsRecomputed"]
    );
}

#[tokio::test]
async fn test_delete_entry_recomputes_when_publish_fails() {
    let h = Harness::with_event_bus(MockEventBus::failing_on("EntryDeleted"));
    let log = h.log_handler();
    log.handle(log_cmd("u1", 10, None)).await.unwrap();
    let second = log.handle(log_cmd("u1", 20, None)).await.unwrap();

    let result = h
        .delete_handler(true)
        .handle(DeleteEntryCommand {
            user_id: "u1".to_string(),
            entry_id: second.entry.id,
        })
        .await
        .unwrap();

    assert!(result.stats_recomputed);
    assert_eq!(h.snapshot("u1").await.unwrap().total_count, 10);
}

#[tokio::test]
async fn test_blank_user_id_is_rejected() {
    let h = Harness::new();

    let provisioned = h
        .provision_handler()
        .handle(ProvisionUserCommand {
            user_id: "  ".to_string(),
            email: "blank@example.com".to_string(),
            display_name: None,
        })
        .await;
    assert!(matches!(provisioned, Err(DomainError::Validation(_))));

    let logged = h.log_handler().handle(log_cmd("", 10, None)).await;
    assert!(matches!(logged, Err(DomainError::Validation(_))));

    let recalculated = h
        .recalculate_handler()
        .handle(RecalculateStatsCommand {
            user_id: String::new(),
        })
        .await;
    assert!(matches!(recalculated, Err(DomainError::Validation(_))));

    assert_eq!(h.entry_repo.len().await, 0);
    assert!(h
        .user_repo
        .find_by_id(&UserId::from_string(""))
        .await
        .unwrap()
        .is_none());
    assert!(h.event_bus.published().await.is_empty());
}

#[tokio::test]
async fn test_stats_are_saved_when_recomputed_event_fails() {
    let h = Harness::with_event_bus(MockEventBus::failing_on("StatsRecomputed"));

    let result = h.log_handler().handle(log_cmd("u1", 12, None)).await.unwrap();

    assert_eq!(result.stats.total_count, 12);
    assert_eq!(h.snapshot("u1").await.unwrap().total_count, 12);
}
