use std::sync::Arc;

use repstreak_domain::entry::{EntryRange, EntryRepository, LogEntry};
use repstreak_domain::shared::{DomainError, EntryId, UserId};
use repstreak_infrastructure::persistence::repositories::SqliteEntryRepository;

mod test_helpers;
use test_helpers::{at, date, entry};

#[tokio::test]
async fn entry_repo_save_and_find_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteEntryRepository::new(pool.clone());
    let user_id = test_helpers::insert_user(&pool, "sam@example.com").await;

    let saved = LogEntry::new(
        user_id.clone(),
        date(2026, 10, 18),
        45,
        Some("Felt strong".to_string()),
        at(0),
    )
    .expect("create entry");
    repo.save(&saved).await.expect("save entry");

    let found = repo
        .find_by_id(saved.id())
        .await
        .expect("find entry")
        .expect("entry should exist");

    assert_eq!(found.count(), 45);
    assert_eq!(found.date(), date(2026, 10, 18));
    assert_eq!(found.notes(), Some("Felt strong"));
    assert_eq!(found.user_id(), &user_id);
    assert_eq!(found.created_at(), at(0));

    let missing = repo.find_by_id(&EntryId::new()).await.expect("find missing");
    assert!(missing.is_none());
}

#[tokio::test]
async fn entry_repo_lists_in_insertion_order_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteEntryRepository::new(pool.clone());
    let user_id = test_helpers::insert_user(&pool, "sam@example.com").await;
    let other_id = test_helpers::insert_user(&pool, "kim@example.com").await;

    // Back-filled entry inserted last must stay last.
    let first = entry(&user_id, date(2026, 10, 18), 10, 0);
    let second = entry(&user_id, date(2026, 10, 17), 20, 0);
    let third = entry(&user_id, date(2026, 10, 12), 30, 0);
    let foreign = entry(&other_id, date(2026, 10, 18), 99, 0);

    for e in [&first, &second, &foreign, &third] {
        repo.save(e).await.expect("save entry");
    }

    let entries = repo.list_by_user(&user_id).await.expect("list entries");
    let ids: Vec<&EntryId> = entries.iter().map(|e| e.id()).collect();

    assert_eq!(ids, vec![first.id(), second.id(), third.id()]);
}

#[tokio::test]
async fn entry_repo_range_query_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteEntryRepository::new(pool.clone());
    let user_id = test_helpers::insert_user(&pool, "sam@example.com").await;

    for (seq, day) in [10, 12, 14, 14, 16].into_iter().enumerate() {
        repo.save(&entry(&user_id, date(2026, 10, day), 5, seq as i64))
            .await
            .expect("save entry");
    }

    let window = repo
        .list_in_range(
            &user_id,
            EntryRange {
                start_date: Some(date(2026, 10, 12)),
                end_date: Some(date(2026, 10, 14)),
                limit: 100,
            },
        )
        .await
        .expect("list range");

    let dates: Vec<_> = window.iter().map(|e| e.date()).collect();
    assert_eq!(
        dates,
        vec![date(2026, 10, 14), date(2026, 10, 14), date(2026, 10, 12)]
    );

    let limited = repo
        .list_in_range(
            &user_id,
            EntryRange {
                start_date: None,
                end_date: None,
                limit: 2,
            },
        )
        .await
        .expect("list limited");

    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].date(), date(2026, 10, 16));
}

#[tokio::test]
async fn entry_repo_delete_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteEntryRepository::new(pool.clone());
    let user_id = test_helpers::insert_user(&pool, "sam@example.com").await;

    let e = entry(&user_id, date(2026, 10, 18), 10, 0);
    repo.save(&e).await.expect("save entry");
    repo.delete(e.id()).await.expect("delete entry");

    assert!(repo.find_by_id(e.id()).await.expect("find").is_none());

    let again = repo.delete(e.id()).await;
    assert!(matches!(again, Err(DomainError::EntryNotFound(_))));
}

#[tokio::test]
async fn entry_repo_rejects_unknown_user_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteEntryRepository::new(Arc::clone(&pool));

    let orphan = entry(&UserId::new(), date(2026, 10, 18), 10, 0);
    let result = repo.save(&orphan).await;

    assert!(matches!(result, Err(DomainError::Repository(_))));
}
