use chrono::{TimeZone, Utc};
use uuid::Uuid;

use super::{MemoryStore, NewsStore, SqliteStore};
use crate::error::StoreError;
use crate::record::Record;

fn sample_record(author: &str) -> Record {
    let published = Utc.with_ymd_and_hms(2024, 4, 7, 5, 13, 27).unwrap();
    Record {
        id: Uuid::nil(),
        author: author.to_string(),
        title: "Breaking News".to_string(),
        summary: "A brief summary of the news".to_string(),
        content: "Full content of the news article".to_string(),
        source: "https://www.example.com".to_string(),
        tags: vec!["tag1".to_string(), "tag2".to_string()],
        created_at: published,
        updated_at: published,
    }
}

/// Behavior shared by both implementations; the API layer relies on them
/// being interchangeable.
fn exercise_store(store: &dyn NewsStore) {
    // Create assigns a fresh id, ignoring whatever the caller sent.
    let created = store.create(sample_record("Batman")).unwrap();
    assert_ne!(created.id, Uuid::nil());

    let found = store.find_by_id(created.id).unwrap();
    assert_eq!(found, created);

    let missing = store.find_by_id(Uuid::new_v4()).unwrap_err();
    assert!(matches!(missing, StoreError::NotFound(_)));
    assert_eq!(missing.http_status(), 404);

    let second = store.create(sample_record("Superman")).unwrap();
    assert_ne!(second.id, created.id);

    let all = store.find_all().unwrap();
    assert_eq!(all.len(), 2);
    for author in ["Batman", "Superman"] {
        assert!(all.iter().any(|r| r.author == author));
    }

    let mut replacement = found.clone();
    replacement.author = "Wolverine".to_string();
    store.update_by_id(created.id, replacement).unwrap();
    let updated = store.find_by_id(created.id).unwrap();
    assert_eq!(updated.author, "Wolverine");
    assert_eq!(updated.id, created.id);
    assert!(updated.updated_at >= created.updated_at);

    let err = store
        .update_by_id(Uuid::new_v4(), sample_record("Nobody"))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    store.delete_by_id(created.id).unwrap();
    assert!(matches!(
        store.find_by_id(created.id),
        Err(StoreError::NotFound(_))
    ));

    // Deleting again, and deleting an id that never existed, both succeed.
    store.delete_by_id(created.id).unwrap();
    store.delete_by_id(Uuid::new_v4()).unwrap();

    let remaining = store.find_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].author, "Superman");
}

#[test]
fn memory_store_crud() {
    exercise_store(&MemoryStore::new());
}

#[test]
fn sqlite_store_crud() {
    exercise_store(&SqliteStore::open_in_memory().unwrap());
}

#[test]
fn sqlite_soft_deleted_rows_stay_hidden() {
    let store = SqliteStore::open_in_memory().unwrap();
    let created = store.create(sample_record("Batman")).unwrap();

    store.delete_by_id(created.id).unwrap();

    assert!(matches!(
        store.find_by_id(created.id),
        Err(StoreError::NotFound(_))
    ));
    assert!(store.find_all().unwrap().is_empty());
    assert!(matches!(
        store.update_by_id(created.id, sample_record("Batman")),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("news.db");

    let id = {
        let store = SqliteStore::open(&path).unwrap();
        store.create(sample_record("Batman")).unwrap().id
    };

    let store = SqliteStore::open(&path).unwrap();
    let found = store.find_by_id(id).unwrap();
    assert_eq!(found.author, "Batman");
    assert_eq!(found.tags, vec!["tag1".to_string(), "tag2".to_string()]);
}

#[test]
fn store_error_status_codes() {
    assert_eq!(StoreError::NotFound(Uuid::nil()).http_status(), 404);
    assert_eq!(StoreError::Backend("boom".to_string()).http_status(), 500);
    assert_eq!(StoreError::LockPoisoned.http_status(), 500);
}
