//! History Persistence Integration Tests
//!
//! Exercises the on-disk JSON file through full store lifecycles:
//! append, reopen, remove, clear.

use chrono::{TimeZone, Utc};
use claimlens::domain::Confidence;
use claimlens::history::{
    FileStorage, HistoryEntry, HistoryQuery, HistoryStore, SortOrder, HISTORY_CAP,
};
use claimlens::Verdict;
use tempfile::TempDir;

fn entry(id: i64, claim: &str) -> HistoryEntry {
    HistoryEntry {
        id,
        claim: claim.to_string(),
        verdict: Verdict::True,
        confidence: Confidence::from_raw(0.8),
        explanation: None,
        evidence: Vec::new(),
        stats: None,
        credibility_score: None,
        timestamp: Utc.timestamp_opt(1_000 + id, 0).unwrap(),
    }
}

fn store_at(temp: &TempDir) -> HistoryStore {
    let path = temp.path().join("state").join("history.json");
    HistoryStore::open(Box::new(FileStorage::new(path)))
}

#[test]
fn test_missing_file_opens_empty() {
    let temp = TempDir::new().unwrap();
    let store = store_at(&temp);
    assert!(store.is_empty());
}

#[test]
fn test_entries_survive_reopen() {
    let temp = TempDir::new().unwrap();

    {
        let mut store = store_at(&temp);
        store.append(entry(1, "first claim")).unwrap();
        store.append(entry(2, "second claim")).unwrap();
    }

    let reloaded = store_at(&temp);
    let all = reloaded.list(&HistoryQuery::default());
    assert_eq!(all.len(), 2);
    // Newest first, before and after the reload.
    assert_eq!(all[0].claim, "second claim");
    assert_eq!(all[1].claim, "first claim");
}

#[test]
fn test_cap_enforced_across_reopen() {
    let temp = TempDir::new().unwrap();

    {
        let mut store = store_at(&temp);
        for i in 0..(HISTORY_CAP as i64 + 10) {
            store.append(entry(i, &format!("claim {i}"))).unwrap();
        }
    }

    let reloaded = store_at(&temp);
    assert_eq!(reloaded.len(), HISTORY_CAP);
    let all = reloaded.list(&HistoryQuery::default());
    assert_eq!(all[0].claim, format!("claim {}", HISTORY_CAP + 9));
}

#[test]
fn test_removal_persists() {
    let temp = TempDir::new().unwrap();

    {
        let mut store = store_at(&temp);
        store.append(entry(1, "keep me")).unwrap();
        store.append(entry(2, "remove me")).unwrap();
        let removed = store.remove(2).unwrap().unwrap();
        assert_eq!(removed.claim, "remove me");
    }

    let reloaded = store_at(&temp);
    let all = reloaded.list(&HistoryQuery::default());
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 1);
}

#[test]
fn test_clear_removes_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state").join("history.json");

    let mut store = HistoryStore::open(Box::new(FileStorage::new(path.clone())));
    store.append(entry(1, "gone soon")).unwrap();
    assert!(path.exists());

    store.clear().unwrap();
    assert!(!path.exists());

    let reloaded = HistoryStore::open(Box::new(FileStorage::new(path)));
    assert!(reloaded.is_empty());
}

#[test]
fn test_corrupt_file_degrades_to_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("history.json");
    std::fs::write(&path, "definitely not json").unwrap();

    let store = HistoryStore::open(Box::new(FileStorage::new(path.clone())));
    assert!(store.is_empty());

    // Appending over the corrupt file recovers it.
    let mut store = store;
    store.append(entry(1, "fresh start")).unwrap();

    let reloaded = HistoryStore::open(Box::new(FileStorage::new(path)));
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn test_query_view_over_persisted_data() {
    let temp = TempDir::new().unwrap();

    {
        let mut store = store_at(&temp);
        store.append(entry(1, "the earth is round")).unwrap();
        store.append(entry(2, "water boils at 100C")).unwrap();
        store.append(entry(3, "the Earth orbits the sun")).unwrap();
    }

    let reloaded = store_at(&temp);
    let hits = reloaded.list(
        &HistoryQuery::default()
            .with_search("earth")
            .with_sort(SortOrder::Oldest),
    );
    assert_eq!(hits.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
}
