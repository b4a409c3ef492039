//! Round-trip and concurrency tests for the document store.

use chrono::NaiveDate;
use tempfile::TempDir;

use omi_core::{CheckInRecord, Document, DocumentStore, FortuneRecord, LoadOutcome};

fn sample_document() -> Document {
    let mut doc = Document::new();
    doc.signin.insert(
        "10001".to_string(),
        CheckInRecord {
            total_days: 12,
            continuous_days: 4,
            last_signin_date: NaiveDate::from_ymd_opt(2024, 6, 30),
            points: 170,
            display_name: "小明".to_string(),
        },
    );
    doc.signin
        .insert("10002".to_string(), CheckInRecord::new("newcomer"));
    doc.fortune.insert(
        "10001".to_string(),
        FortuneRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            love: 88,
            wealth: 3,
            career: 100,
            lucky_index: 63,
            quote: "好运正在向你奔来。".to_string(),
        },
    );
    doc
}

#[tokio::test]
async fn save_then_load_reproduces_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plugin_data.json");
    let expected = sample_document();

    let store = DocumentStore::new(&path);
    {
        let mut doc = store.lock().await;
        *doc = expected.clone();
    }
    store.save().await.unwrap();

    let reloaded = DocumentStore::new(&path);
    assert_eq!(reloaded.load().await, LoadOutcome::Loaded);
    assert_eq!(reloaded.snapshot().await, expected);
}

#[tokio::test]
async fn file_uses_documented_keys_and_keeps_unicode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plugin_data.json");
    let store = DocumentStore::new(&path);
    {
        let mut doc = store.lock().await;
        *doc = sample_document();
        assert!(doc.persist().await);
    }

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("小明"));
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value["signin"]["10001"]["continuous_days"].is_number());
    assert_eq!(value["signin"]["10001"]["last_signin_date"], "2024-06-30");
    assert_eq!(value["signin"]["10002"]["last_signin_date"], "");
    assert_eq!(value["fortune"]["10001"]["date"], "2024-06-30");
    assert_eq!(value["fortune"]["10001"]["lucky_index"], 63);
}

#[tokio::test]
async fn reload_replaces_memory_with_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plugin_data.json");
    let store = DocumentStore::open(&path).await;
    assert!(store.snapshot().await.is_empty());

    std::fs::write(&path, serde_json::to_string(&sample_document()).unwrap()).unwrap();
    assert_eq!(store.load().await, LoadOutcome::Loaded);
    assert_eq!(store.snapshot().await.signin.len(), 2);
}

#[tokio::test]
async fn concurrent_writers_do_not_lose_updates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plugin_data.json");
    let store = std::sync::Arc::new(DocumentStore::open(&path).await);

    let mut handles = Vec::new();
    for i in 0..16u64 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let mut doc = store.lock().await;
            let entry = doc
                .signin
                .entry("shared".to_string())
                .or_insert_with(|| CheckInRecord::new("shared"));
            entry.points += i;
            entry.total_days += 1;
            doc.persist().await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let reloaded = DocumentStore::open(&path).await.snapshot().await;
    let rec = &reloaded.signin["shared"];
    assert_eq!(rec.total_days, 16);
    assert_eq!(rec.points, (0..16).sum::<u64>());
}
